//! The child collection and its "currently selected child" pointer.

use chrono::Local;
use tracing::{info, warn};

use shared::{Child, ChildUpdate, CreateChildRequest, GrowthRecordRequest, GrowthSnapshot};

use crate::api::ApiClient;
use crate::domain::growth::{compute_snapshot, GrowthInput};
use crate::errors::StoreError;

/// Card colors cycled through as children are added.
const CHILD_COLORS: &[&str] = &[
    "#4A90E2", "#E94B7D", "#50C878", "#F5A623", "#9B59B6", "#16A2B8",
];

/// Input for adding a child.
///
/// `date_of_birth` is only needed when the child is created on the
/// server; local-only adds carry just the free-text age.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewChild {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub date_of_birth: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

/// In-memory child collection, optionally synchronized with the
/// backend.
///
/// Selection is held by id and always reads through to the collection,
/// so an update to the selected child is immediately what `selected()`
/// returns. All methods run on the single UI task; there is no locking
/// because there are no concurrent writers.
pub struct ChildStore {
    api: ApiClient,
    children: Vec<Child>,
    selected: Option<i64>,
}

impl ChildStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            children: Vec::new(),
            selected: None,
        }
    }

    /// Seed the store with an existing collection; the first child
    /// starts out selected.
    pub fn with_children(api: ApiClient, children: Vec<Child>) -> Self {
        let selected = children.first().map(|c| c.id);
        Self {
            api,
            children,
            selected,
        }
    }

    /// The current collection, in insertion/load order.
    pub fn list(&self) -> &[Child] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    /// The currently selected child, if any.
    pub fn selected(&self) -> Option<&Child> {
        self.selected
            .and_then(|id| self.children.iter().find(|c| c.id == id))
    }

    /// Select a child by id.
    pub fn select(&mut self, id: i64) -> Result<&Child, StoreError> {
        match self.children.iter().position(|c| c.id == id) {
            Some(index) => {
                self.selected = Some(id);
                Ok(&self.children[index])
            }
            None => Err(StoreError::ChildNotFound(id)),
        }
    }

    /// Add a child. With a token the child is created on the backend
    /// and the returned record (with its server-assigned id) is kept;
    /// without one the id is assigned locally as max+1. The new child
    /// becomes the selected one either way.
    pub async fn add(&mut self, new: NewChild, token: Option<&str>) -> Result<&Child, StoreError> {
        let child = match token {
            Some(token) => {
                let date_of_birth = new
                    .date_of_birth
                    .clone()
                    .ok_or(StoreError::MissingBirthDate)?;
                let request = CreateChildRequest {
                    name: new.name.clone(),
                    gender: new.gender.clone(),
                    date_of_birth,
                    height: new.height,
                    weight: new.weight,
                };
                info!(name = %request.name, "creating child on backend");
                let mut child = self.api.create_child(token, &request).await?;
                if child.age.is_empty() {
                    child.age = new.age.clone();
                }
                child
            }
            None => Child {
                id: self.next_id(),
                name: new.name,
                age: new.age,
                gender: new.gender,
                avatar: String::new(),
                color: String::new(),
                height: new.height,
                weight: new.weight,
                bmi: None,
                bmi_status: None,
                development_score: None,
                last_checkup: None,
                height_change: None,
                weight_change: None,
            },
        };

        let index = self.children.len();
        self.children.push(child);
        decorate(&mut self.children[index], index);
        let id = self.children[index].id;
        self.selected = Some(id);
        info!(child_id = id, "child added and selected");
        Ok(&self.children[index])
    }

    /// Merge partial fields into the matching child. Unknown ids leave
    /// the collection and selection untouched.
    pub fn update(&mut self, id: i64, update: ChildUpdate) -> Result<&Child, StoreError> {
        let index = self
            .children
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::ChildNotFound(id))?;

        let child = &mut self.children[index];
        if let Some(name) = update.name {
            child.name = name;
        }
        if let Some(age) = update.age {
            child.age = age;
        }
        if let Some(gender) = update.gender {
            child.gender = gender;
        }
        if let Some(avatar) = update.avatar {
            child.avatar = avatar;
        }
        if let Some(color) = update.color {
            child.color = color;
        }
        if let Some(growth) = update.growth {
            child.apply_growth(&growth);
        }
        Ok(&self.children[index])
    }

    /// Remove a child. When the removed child was selected, selection
    /// falls back to the first remaining child, or to none.
    pub fn remove(&mut self, id: i64) -> Result<Child, StoreError> {
        let index = self
            .children
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::ChildNotFound(id))?;
        let removed = self.children.remove(index);
        if self.selected == Some(id) {
            self.selected = self.children.first().map(|c| c.id);
        }
        info!(child_id = id, "child removed");
        Ok(removed)
    }

    /// Replace the local collection with the backend's. The first child
    /// is auto-selected when nothing (or something now gone) was
    /// selected.
    pub async fn refresh(&mut self, token: &str) -> Result<usize, StoreError> {
        let children = self.api.list_children(token).await?;
        info!(count = children.len(), "loaded children from backend");
        self.children = children;
        for (index, child) in self.children.iter_mut().enumerate() {
            decorate(child, index);
        }
        let selection_valid = self
            .selected
            .map(|id| self.children.iter().any(|c| c.id == id))
            .unwrap_or(false);
        if !selection_valid {
            self.selected = self.children.first().map(|c| c.id);
        }
        Ok(self.children.len())
    }

    /// Log a growth measurement for the selected child.
    ///
    /// Validation failures and backend rejections leave the child
    /// record untouched; only a fully computed snapshot is applied.
    pub async fn log_growth(
        &mut self,
        input: &GrowthInput,
        token: Option<&str>,
    ) -> Result<GrowthSnapshot, StoreError> {
        let child = self.selected().ok_or(StoreError::NoChildSelected)?;
        let measurement = input.parse()?;
        let today = Local::now().date_naive();
        let snapshot = compute_snapshot(child, measurement, today);
        let child_id = child.id;

        if let Some(token) = token {
            let request = GrowthRecordRequest {
                height: measurement.height_cm,
                weight: measurement.weight_kg,
                recorded_date: today.to_string(),
            };
            self.api.record_growth(token, child_id, &request).await?;
        } else {
            warn!(child_id, "no session, growth log kept locally only");
        }

        self.update(child_id, ChildUpdate::from_growth(snapshot.clone()))?;
        info!(child_id, bmi = snapshot.bmi, status = %snapshot.bmi_status, "growth logged");
        Ok(snapshot)
    }

    fn next_id(&self) -> i64 {
        self.children.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }
}

/// Fill in a missing avatar glyph or card color.
fn decorate(child: &mut Child, index: usize) {
    if child.avatar.is_empty() {
        child.avatar = child.avatar_glyph();
    }
    if child.color.is_empty() {
        child.color = CHILD_COLORS[index % CHILD_COLORS.len()].to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> ApiClient {
        ApiClient::with_base_url("http://localhost:8080").unwrap()
    }

    fn store() -> ChildStore {
        ChildStore::new(api())
    }

    fn new_child(name: &str, age: &str) -> NewChild {
        NewChild {
            name: name.to_string(),
            age: age.to_string(),
            gender: "Male".to_string(),
            ..NewChild::default()
        }
    }

    #[tokio::test]
    async fn test_add_assigns_sequential_ids_and_selects() {
        let mut store = store();
        store.add(new_child("Malith", "2y 3m"), None).await.unwrap();
        store.add(new_child("Amaya", "6m"), None).await.unwrap();
        assert_eq!(store.list()[0].id, 1);
        assert_eq!(store.list()[1].id, 2);
        assert_eq!(store.selected().unwrap().name, "Amaya");
    }

    #[tokio::test]
    async fn test_ids_stay_unique_after_removal() {
        let mut store = store();
        store.add(new_child("A", "1y"), None).await.unwrap();
        store.add(new_child("B", "2y"), None).await.unwrap();
        store.add(new_child("C", "3y"), None).await.unwrap();
        store.remove(2).unwrap();
        store.add(new_child("D", "4y"), None).await.unwrap();
        let mut ids: Vec<i64> = store.list().iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), store.list().len());
    }

    #[tokio::test]
    async fn test_add_decorates_avatar_and_color() {
        let mut store = store();
        let child = store.add(new_child("Malith", "2y 3m"), None).await.unwrap();
        assert_eq!(child.avatar, "M");
        assert_eq!(child.color, "#4A90E2");
    }

    #[test]
    fn test_select_unknown_id_is_an_error() {
        let mut store = store();
        assert!(matches!(
            store.select(42),
            Err(StoreError::ChildNotFound(42))
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_id_changes_nothing() {
        let mut store = store();
        store.add(new_child("Malith", "2y 3m"), None).await.unwrap();
        let before = store.list().to_vec();
        let selected_before = store.selected_id();

        let result = store.update(
            99,
            ChildUpdate {
                name: Some("Other".to_string()),
                ..ChildUpdate::default()
            },
        );
        assert!(matches!(result, Err(StoreError::ChildNotFound(99))));
        assert_eq!(store.list(), before.as_slice());
        assert_eq!(store.selected_id(), selected_before);
    }

    #[tokio::test]
    async fn test_update_selected_child_is_visible_through_selection() {
        let mut store = store();
        store.add(new_child("Malith", "2y 3m"), None).await.unwrap();
        store
            .update(
                1,
                ChildUpdate {
                    name: Some("Malith F.".to_string()),
                    ..ChildUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(store.selected().unwrap().name, "Malith F.");
    }

    #[tokio::test]
    async fn test_remove_selected_falls_back_to_first_remaining() {
        let mut store = store();
        store.add(new_child("A", "1y"), None).await.unwrap();
        store.add(new_child("B", "2y"), None).await.unwrap();
        // B is selected (latest add); removing it falls back to A.
        store.remove(2).unwrap();
        assert_eq!(store.selected().unwrap().name, "A");
        store.remove(1).unwrap();
        assert!(store.selected().is_none());
    }

    #[tokio::test]
    async fn test_log_growth_requires_selection() {
        let mut store = store();
        let result = store
            .log_growth(&GrowthInput::new("89", "12.5"), None)
            .await;
        assert!(matches!(result, Err(StoreError::NoChildSelected)));
    }

    #[tokio::test]
    async fn test_log_growth_rejects_invalid_input_without_mutation() {
        let mut store = store();
        store.add(new_child("Malith", "2y 3m"), None).await.unwrap();
        let before = store.selected().unwrap().clone();

        let result = store.log_growth(&GrowthInput::new("0", "12.5"), None).await;
        assert!(matches!(result, Err(StoreError::InvalidGrowthInput(_))));
        assert_eq!(store.selected().unwrap(), &before);
    }

    #[tokio::test]
    async fn test_log_growth_applies_snapshot_to_selected_child() {
        let mut store = store();
        store.add(new_child("Malith", "2y 3m"), None).await.unwrap();
        let snapshot = store
            .log_growth(&GrowthInput::new("89", "12.5"), None)
            .await
            .unwrap();
        assert_eq!(snapshot.height_change, "+89.0 cm");
        let child = store.selected().unwrap();
        assert_eq!(child.height, Some(89.0));
        assert_eq!(child.bmi, Some(15.8));
        assert_eq!(child.bmi_status, Some(shared::BmiStatus::Underweight));
    }

    #[test]
    fn test_with_children_selects_first() {
        let children = vec![
            Child {
                id: 10,
                name: "Malith".to_string(),
                age: "2y 3m".to_string(),
                gender: "Male".to_string(),
                avatar: "M".to_string(),
                color: "#4A90E2".to_string(),
                height: None,
                weight: None,
                bmi: None,
                bmi_status: None,
                development_score: None,
                last_checkup: None,
                height_change: None,
                weight_change: None,
            },
        ];
        let store = ChildStore::with_children(api(), children);
        assert_eq!(store.selected_id(), Some(10));
    }
}
