//! Age-based reference content: vaccines, developmental milestones, and
//! care tips. Static catalogs selected by bracket; identical bracket
//! always yields the identical catalog.

use super::age::AgeBracket;

/// An upcoming vaccine entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vaccine {
    pub name: &'static str,
    pub description: &'static str,
    pub due_date: &'static str,
    pub urgent: bool,
}

/// A developmental milestone with the progress shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub category: &'static str,
    pub progress: u8,
    pub emoji: &'static str,
    pub color: &'static str,
}

/// A rotating care tip card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareTip {
    pub title: &'static str,
    pub tip: &'static str,
    pub emoji: &'static str,
    pub category: &'static str,
}

/// Everything the home and health screens render for one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareContent {
    pub vaccines: &'static [Vaccine],
    pub milestones: &'static [Milestone],
    pub tips: &'static [CareTip],
}

const VACCINES_UP_TO_TWO: &[Vaccine] = &[
    Vaccine {
        name: "MMR Vaccine (1st Dose)",
        description: "Measles, Mumps, and Rubella",
        due_date: "Due Next Week",
        urgent: true,
    },
    Vaccine {
        name: "DTP Series",
        description: "Diphtheria, Tetanus, and Pertussis",
        due_date: "Due in 2 months",
        urgent: false,
    },
    Vaccine {
        name: "Polio Vaccine",
        description: "Oral Polio Vaccine",
        due_date: "Due in 3 months",
        urgent: false,
    },
];

const VACCINES_UP_TO_FOUR: &[Vaccine] = &[
    Vaccine {
        name: "MMR Vaccine (2nd Dose)",
        description: "Measles, Mumps, and Rubella",
        due_date: "Due Tomorrow",
        urgent: true,
    },
    Vaccine {
        name: "DTP Booster",
        description: "Diphtheria, Tetanus, and Pertussis",
        due_date: "Due in 3 months",
        urgent: false,
    },
];

const VACCINES_OVER_FOUR: &[Vaccine] = &[
    Vaccine {
        name: "School Entry Vaccines",
        description: "Required vaccinations for school",
        due_date: "Due before school starts",
        urgent: true,
    },
    Vaccine {
        name: "Annual Flu Shot",
        description: "Seasonal influenza vaccine",
        due_date: "Due annually",
        urgent: false,
    },
];

const MILESTONES_UP_TO_TWO: &[Milestone] = &[
    Milestone {
        category: "Physical",
        progress: 90,
        emoji: "🏃",
        color: "green-500",
    },
    Milestone {
        category: "Cognitive",
        progress: 85,
        emoji: "🧠",
        color: "purple-500",
    },
    Milestone {
        category: "Language",
        progress: 80,
        emoji: "🗣️",
        color: "cyan-500",
    },
    Milestone {
        category: "Social",
        progress: 88,
        emoji: "👫",
        color: "amber-500",
    },
];

const MILESTONES_UP_TO_FOUR: &[Milestone] = &[
    Milestone {
        category: "Physical",
        progress: 92,
        emoji: "🚴",
        color: "green-500",
    },
    Milestone {
        category: "Cognitive",
        progress: 88,
        emoji: "🧩",
        color: "purple-500",
    },
    Milestone {
        category: "Language",
        progress: 86,
        emoji: "📖",
        color: "cyan-500",
    },
    Milestone {
        category: "Social",
        progress: 84,
        emoji: "🤝",
        color: "amber-500",
    },
];

const MILESTONES_OVER_FOUR: &[Milestone] = &[
    Milestone {
        category: "Physical",
        progress: 94,
        emoji: "⚽",
        color: "green-500",
    },
    Milestone {
        category: "Cognitive",
        progress: 90,
        emoji: "🔢",
        color: "purple-500",
    },
    Milestone {
        category: "Language",
        progress: 91,
        emoji: "✍️",
        color: "cyan-500",
    },
    Milestone {
        category: "Social",
        progress: 89,
        emoji: "🏫",
        color: "amber-500",
    },
];

const TIPS_UP_TO_TWO: &[CareTip] = &[
    CareTip {
        title: "Language Development",
        tip: "Read stories together daily. At this age children should know 50+ words and start combining them.",
        emoji: "📚",
        category: "Development",
    },
    CareTip {
        title: "Nutrition Focus",
        tip: "Offer variety of foods. Toddlers need calcium for bone growth - include dairy, leafy greens.",
        emoji: "🥛",
        category: "Nutrition",
    },
    CareTip {
        title: "Sleep Schedule",
        tip: "Maintain 11-14 hours total sleep. Consistent bedtime routine helps brain development.",
        emoji: "😴",
        category: "Sleep",
    },
    CareTip {
        title: "Physical Activity",
        tip: "Encourage running, jumping, climbing. Physical play develops motor skills and coordination.",
        emoji: "⚽",
        category: "Activity",
    },
    CareTip {
        title: "Social Skills",
        tip: "Arrange playdates with other children. This age learns sharing and taking turns.",
        emoji: "👶",
        category: "Social",
    },
];

const TIPS_UP_TO_FOUR: &[CareTip] = &[
    CareTip {
        title: "Imaginative Play",
        tip: "Offer dress-up clothes, blocks and pretend kitchens. Role play builds storytelling and empathy.",
        emoji: "🎭",
        category: "Development",
    },
    CareTip {
        title: "Balanced Plate",
        tip: "Serve small portions of every food group. Preschoolers eat best with predictable meal times.",
        emoji: "🍎",
        category: "Nutrition",
    },
    CareTip {
        title: "Wind-Down Routine",
        tip: "Target 10-13 hours of sleep with a fixed bedtime. Screens off an hour before lights out.",
        emoji: "🌙",
        category: "Sleep",
    },
    CareTip {
        title: "Counting Everywhere",
        tip: "Count stairs, toys and snacks aloud together. Everyday counting builds early number sense.",
        emoji: "🔢",
        category: "Learning",
    },
];

const TIPS_OVER_FOUR: &[CareTip] = &[
    CareTip {
        title: "School Readiness",
        tip: "Practice a morning routine together. Knowing what comes next makes school days calmer.",
        emoji: "🎒",
        category: "Learning",
    },
    CareTip {
        title: "Active Hours",
        tip: "Aim for at least an hour of active play daily - sports, cycling, or the playground.",
        emoji: "🚴",
        category: "Activity",
    },
    CareTip {
        title: "Screen Balance",
        tip: "Keep recreational screen time under two hours and pair it with plenty of outdoor play.",
        emoji: "📵",
        category: "Habits",
    },
    CareTip {
        title: "Friendship Skills",
        tip: "Talk through playground conflicts at home. Naming feelings helps children resolve them.",
        emoji: "🧒",
        category: "Social",
    },
];

/// Vaccines due for an age bracket.
pub fn vaccines_for(bracket: AgeBracket) -> &'static [Vaccine] {
    match bracket {
        AgeBracket::UpToTwo => VACCINES_UP_TO_TWO,
        AgeBracket::UpToFour => VACCINES_UP_TO_FOUR,
        AgeBracket::OverFour => VACCINES_OVER_FOUR,
    }
}

/// Developmental milestones for an age bracket.
pub fn milestones_for(bracket: AgeBracket) -> &'static [Milestone] {
    match bracket {
        AgeBracket::UpToTwo => MILESTONES_UP_TO_TWO,
        AgeBracket::UpToFour => MILESTONES_UP_TO_FOUR,
        AgeBracket::OverFour => MILESTONES_OVER_FOUR,
    }
}

/// Care tips for an age bracket.
pub fn tips_for(bracket: AgeBracket) -> &'static [CareTip] {
    match bracket {
        AgeBracket::UpToTwo => TIPS_UP_TO_TWO,
        AgeBracket::UpToFour => TIPS_UP_TO_FOUR,
        AgeBracket::OverFour => TIPS_OVER_FOUR,
    }
}

/// The combined catalog for one bracket.
pub fn content_for(bracket: AgeBracket) -> CareContent {
    CareContent {
        vaccines: vaccines_for(bracket),
        milestones: milestones_for(bracket),
        tips: tips_for(bracket),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_bracket_yields_identical_catalog() {
        let a = content_for(AgeBracket::UpToTwo);
        let b = content_for(AgeBracket::UpToTwo);
        assert_eq!(a, b);
    }

    #[test]
    fn test_brackets_have_distinct_vaccine_schedules() {
        let under_two = vaccines_for(AgeBracket::UpToTwo);
        let under_four = vaccines_for(AgeBracket::UpToFour);
        let school_age = vaccines_for(AgeBracket::OverFour);
        assert_eq!(under_two.len(), 3);
        assert_eq!(under_four.len(), 2);
        assert_eq!(school_age.len(), 2);
        assert_eq!(under_two[0].name, "MMR Vaccine (1st Dose)");
        assert_eq!(under_four[0].name, "MMR Vaccine (2nd Dose)");
        assert!(school_age[0].urgent);
    }

    #[test]
    fn test_every_bracket_flags_exactly_one_urgent_vaccine() {
        for bracket in [AgeBracket::UpToTwo, AgeBracket::UpToFour, AgeBracket::OverFour] {
            let urgent = vaccines_for(bracket).iter().filter(|v| v.urgent).count();
            assert_eq!(urgent, 1, "bracket {:?}", bracket);
        }
    }

    #[test]
    fn test_milestone_progress_is_percentage() {
        for bracket in [AgeBracket::UpToTwo, AgeBracket::UpToFour, AgeBracket::OverFour] {
            for milestone in milestones_for(bracket) {
                assert!(milestone.progress <= 100);
            }
            assert_eq!(milestones_for(bracket).len(), 4);
        }
    }

    #[test]
    fn test_tips_are_non_empty_for_all_brackets() {
        for bracket in [AgeBracket::UpToTwo, AgeBracket::UpToFour, AgeBracket::OverFour] {
            assert!(!tips_for(bracket).is_empty());
        }
    }
}
