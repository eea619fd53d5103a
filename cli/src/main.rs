//! Terminal client for the care backend.
//!
//! Drives the same client core the mobile shells are built on: auth
//! session, child collection, growth logging, age-based content, and
//! the caregiver/care-request flows.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use shared::{CreateCareRequest, RegisterCaregiverRequest, RegisterForm, UserRole};
use tikiri_client::domain::{content_for, AgeBracket, GrowthInput};
use tikiri_client::{ApiConfig, App, NewChild};

#[derive(Parser)]
#[command(name = "tikiri", version, about = "Terminal client for TikiriCare / TikiriPiyasa")]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, default_value = "http://localhost:8080")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Role {
    Parent,
    Caregiver,
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Parent => UserRole::Parent,
            Role::Caregiver => UserRole::Caregiver,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Check backend reachability and session state
    Status,
    /// Log in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Register a new account and log in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        telephone: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_enum, default_value = "parent")]
        role: Role,
    },
    /// Clear the persisted session
    Logout,
    /// List the children on the account
    Children,
    /// Add a child
    AddChild {
        #[arg(long)]
        name: String,
        /// Free-text age, e.g. "2y 3m"
        #[arg(long)]
        age: String,
        #[arg(long)]
        gender: String,
        /// YYYY-MM-DD, required to create the child on the server
        #[arg(long)]
        date_of_birth: Option<String>,
    },
    /// Log a growth measurement for a child
    Growth {
        /// Height in cm
        height: String,
        /// Weight in kg
        weight: String,
        /// Child id (defaults to the first child)
        #[arg(long)]
        child: Option<i64>,
    },
    /// Show age-based vaccines, milestones and care tips
    Content {
        /// Explicit age instead of a child's, e.g. "4y 1m"
        #[arg(long)]
        age: Option<String>,
        /// Child id (defaults to the first child)
        #[arg(long)]
        child: Option<i64>,
    },
    /// List the caregiver directory
    Caregivers,
    /// Register a caregiver profile
    RegisterCaregiver {
        #[arg(long)]
        name: String,
        #[arg(long)]
        specialization: String,
        #[arg(long)]
        experience: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        contact_number: String,
        /// Repeatable: --service daycare --service "after school"
        #[arg(long = "service")]
        services: Vec<String>,
    },
    /// List care requests
    Requests,
    /// Create a care request for a child
    Request {
        #[arg(long)]
        child: i64,
        #[arg(long)]
        service: String,
        #[arg(long)]
        description: String,
        /// Preferred date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Preferred time slot, e.g. "morning"
        #[arg(long)]
        time: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut app = App::new(ApiConfig {
        base_url: cli.server.clone(),
        ..ApiConfig::default()
    })?;
    app.bootstrap().await;

    match cli.command {
        Command::Status => status(&app).await,
        Command::Login { email, password } => login(&mut app, &email, &password).await,
        Command::Register {
            name,
            email,
            telephone,
            password,
            role,
        } => register(&mut app, name, email, telephone, password, role.into()).await,
        Command::Logout => {
            app.auth.logout();
            println!("Logged out.");
            Ok(())
        }
        Command::Children => children(&app),
        Command::AddChild {
            name,
            age,
            gender,
            date_of_birth,
        } => add_child(&mut app, name, age, gender, date_of_birth).await,
        Command::Growth {
            height,
            weight,
            child,
        } => growth(&mut app, &height, &weight, child).await,
        Command::Content { age, child } => content(&mut app, age, child),
        Command::Caregivers => caregivers(&app).await,
        Command::RegisterCaregiver {
            name,
            specialization,
            experience,
            location,
            contact_number,
            services,
        } => {
            register_caregiver(
                &app,
                RegisterCaregiverRequest {
                    name,
                    specialization,
                    experience,
                    location,
                    contact_number,
                    services,
                },
            )
            .await
        }
        Command::Requests => requests(&app).await,
        Command::Request {
            child,
            service,
            description,
            date,
            time,
        } => {
            create_request(
                &app,
                CreateCareRequest {
                    child_id: child,
                    service_type: service,
                    description,
                    preferred_date: date,
                    preferred_time: time,
                },
            )
            .await
        }
    }
}

fn require_token(app: &App) -> Result<String> {
    app.auth
        .token()
        .map(str::to_string)
        .context("not logged in - run `tikiri login` first")
}

async fn status(app: &App) -> Result<()> {
    match app.api.health().await {
        Ok(_) => println!("Backend {}: reachable", app.api.base_url()),
        Err(err) => println!("Backend {}: unreachable ({})", app.api.base_url(), err),
    }
    match app.auth.user() {
        Some(user) => println!("Session: {} <{}>", user.name, user.email),
        None => println!("Session: none"),
    }
    println!("Children loaded: {}", app.children.list().len());
    Ok(())
}

async fn login(app: &mut App, email: &str, password: &str) -> Result<()> {
    let user = app.auth.login(email, password).await?;
    println!("Welcome back, {}!", user.name);
    let token = require_token(app)?;
    let count = app.children.refresh(&token).await?;
    println!("Loaded {} children.", count);
    Ok(())
}

async fn register(
    app: &mut App,
    name: String,
    email: String,
    telephone: String,
    password: String,
    role: UserRole,
) -> Result<()> {
    let form = RegisterForm {
        name,
        email,
        telephone,
        confirm_password: password.clone(),
        password,
    };
    let user = app.auth.register(&form, role).await?;
    println!("Account created for {} ({}).", user.name, role);
    Ok(())
}

fn children(app: &App) -> Result<()> {
    if app.children.is_empty() {
        println!("No children yet - add one with `tikiri add-child`.");
        return Ok(());
    }
    for child in app.children.list() {
        let marker = if app.children.selected_id() == Some(child.id) {
            "*"
        } else {
            " "
        };
        print!(
            "{} [{}] {} {} - {}, {}",
            marker,
            child.id,
            child.avatar_glyph(),
            child.name,
            child.age,
            child.gender
        );
        if let (Some(height), Some(weight)) = (child.height, child.weight) {
            print!(", {:.1} cm / {:.1} kg", height, weight);
        }
        if let (Some(bmi), Some(status)) = (child.bmi, child.bmi_status) {
            print!(", BMI {:.1} ({})", bmi, status);
        }
        println!();
    }
    Ok(())
}

async fn add_child(
    app: &mut App,
    name: String,
    age: String,
    gender: String,
    date_of_birth: Option<String>,
) -> Result<()> {
    let token = require_token(app)?;
    let child = app
        .children
        .add(
            NewChild {
                name,
                age,
                gender,
                date_of_birth,
                ..NewChild::default()
            },
            Some(&token),
        )
        .await?;
    println!("Added {} (id {}), now selected.", child.name, child.id);
    Ok(())
}

async fn growth(app: &mut App, height: &str, weight: &str, child: Option<i64>) -> Result<()> {
    let token = require_token(app)?;
    if let Some(id) = child {
        app.children.select(id)?;
    }
    let name = app
        .children
        .selected()
        .map(|c| c.name.clone())
        .context("no child to log growth for")?;
    let snapshot = app
        .children
        .log_growth(&GrowthInput::new(height, weight), Some(&token))
        .await?;
    println!("Growth data saved for {}.", name);
    println!("  Height: {:.1} cm ({})", snapshot.height, snapshot.height_change);
    println!("  Weight: {:.1} kg ({})", snapshot.weight, snapshot.weight_change);
    println!("  BMI: {:.1} ({})", snapshot.bmi, snapshot.bmi_status);
    Ok(())
}

fn content(app: &mut App, age: Option<String>, child: Option<i64>) -> Result<()> {
    let age_text = match (age, child) {
        (Some(age), _) => age,
        (None, Some(id)) => app.children.select(id)?.age.clone(),
        (None, None) => app
            .children
            .selected()
            .map(|c| c.age.clone())
            .context("no child selected - pass --age or --child")?,
    };
    let bracket = AgeBracket::classify_lossy(&age_text);
    let content = content_for(bracket);

    println!("Content for {} ({}):", age_text, bracket.label());
    println!("\nUpcoming vaccines:");
    for vaccine in content.vaccines {
        let urgency = if vaccine.urgent { " [urgent]" } else { "" };
        println!(
            "  💉 {} - {} ({}){}",
            vaccine.name, vaccine.description, vaccine.due_date, urgency
        );
    }
    println!("\nDevelopment milestones:");
    for milestone in content.milestones {
        println!(
            "  {} {}: {}%",
            milestone.emoji, milestone.category, milestone.progress
        );
    }
    println!("\nCare tips:");
    for tip in content.tips {
        println!("  {} {} - {}", tip.emoji, tip.title, tip.tip);
    }
    Ok(())
}

async fn caregivers(app: &App) -> Result<()> {
    let token = require_token(app)?;
    let caregivers = app.api.list_caregivers(&token).await?;
    if caregivers.is_empty() {
        println!("No caregivers registered.");
    }
    for caregiver in caregivers {
        println!(
            "[{}] {} - {} ({}), {} - {}",
            caregiver.id,
            caregiver.name,
            caregiver.specialization,
            caregiver.experience,
            caregiver.location,
            caregiver.services.join(", ")
        );
    }
    Ok(())
}

async fn register_caregiver(app: &App, request: RegisterCaregiverRequest) -> Result<()> {
    let token = require_token(app)?;
    let caregiver = app.api.register_caregiver(&token, &request).await?;
    println!("Registered caregiver {} (id {}).", caregiver.name, caregiver.id);
    Ok(())
}

async fn requests(app: &App) -> Result<()> {
    let token = require_token(app)?;
    let requests = app.api.list_care_requests(&token).await?;
    if requests.is_empty() {
        println!("No care requests.");
    }
    let by_id = |id: i64| -> String {
        app.children
            .list()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("child {}", id))
    };
    for request in requests {
        println!(
            "[{}] {} for {} on {} ({}) - {:?}",
            request.id,
            request.service_type,
            by_id(request.child_id),
            request.preferred_date,
            request.preferred_time,
            request.status
        );
    }
    Ok(())
}

async fn create_request(app: &App, request: CreateCareRequest) -> Result<()> {
    let token = require_token(app)?;
    // The child must exist locally before asking a center to take it on.
    if !app.children.list().iter().any(|c| c.id == request.child_id) {
        anyhow::bail!("unknown child id {}", request.child_id);
    }
    let created = app.api.create_care_request(&token, &request).await?;
    println!(
        "Care request {} created: {} on {} ({}), status {:?}.",
        created.id,
        created.service_type,
        created.preferred_date,
        created.preferred_time,
        created.status
    );
    Ok(())
}
