//! VDF Screen State Store
//!
//! Uses Leptos reactive_stores so the selected year, search term and family
//! list are shared by the VDF screens and survive navigation between them.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::format::current_year;
use crate::models::FamilyConfig;

#[derive(Clone, Debug, Default, Store)]
pub struct VdfState {
    /// Last fetched family configs (replaced wholesale on refetch)
    pub families: Vec<FamilyConfig>,
    /// Year shown by the contribution matrix
    pub selected_year: i32,
    /// Head-name filter shared by family and contribution lists
    pub search: String,
}

impl VdfState {
    pub fn new() -> Self {
        Self {
            selected_year: current_year(),
            ..Default::default()
        }
    }
}

pub type VdfStore = Store<VdfState>;

pub fn use_vdf_store() -> VdfStore {
    expect_context::<VdfStore>()
}

/// Replace the family list after a refetch
pub fn store_set_families(store: &VdfStore, families: Vec<FamilyConfig>) {
    *store.families().write() = families;
}

/// Step the selected year by `delta`, staying in the supported range
pub fn store_shift_year(store: &VdfStore, delta: i32) {
    let field = store.selected_year();
    let mut year = field.write();
    *year = (*year + delta).clamp(2000, 2100);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_year_stays_in_range() {
        Owner::new().with(|| {
            let store = Store::new(VdfState { selected_year: 2099, ..Default::default() });

            store_shift_year(&store, 1);
            assert_eq!(store.selected_year().get_untracked(), 2100);
            store_shift_year(&store, 1);
            assert_eq!(store.selected_year().get_untracked(), 2100);
            store_shift_year(&store, -3);
            assert_eq!(store.selected_year().get_untracked(), 2097);
        });
    }

    fn family(id: i64, name: &str) -> FamilyConfig {
        FamilyConfig {
            id,
            head_name: name.to_string(),
            member_id: None,
            monthly_amount: 100.0,
            is_enabled: true,
            effective_from: None,
            total_paid: 0.0,
            total_due: 0.0,
            notes: None,
        }
    }

    #[test]
    fn test_families_survive_view_teardown() {
        Owner::new().with(|| {
            let store = Store::new(VdfState::new());

            let page = Owner::new();
            page.with(|| store_set_families(&store, vec![family(1, "Ram"), family(2, "Sita")]));
            page.cleanup();

            let names: Vec<String> = store.families().get_untracked().into_iter().map(|f| f.head_name).collect();
            assert_eq!(names, vec!["Ram", "Sita"]);

            store_set_families(&store, vec![family(3, "Hari")]);
            assert_eq!(store.families().get_untracked().len(), 1);
        });
    }
}
