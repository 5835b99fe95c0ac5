pub mod compose;
pub mod error;
pub mod session;
pub mod shop;
pub mod token;
pub mod treatment;

// Re-export commonly used types
pub use compose::compose_message;
pub use error::{FlowError, Result};
pub use session::{InMemorySessionStorage, Session, SessionStorage, WizardState};
pub use shop::{Shop, ShopDirectory};
pub use treatment::{GeneratedContent, TreatmentInfo};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wizard_walkthrough() {
        let shops = ShopDirectory::builtin();
        let storage = InMemorySessionStorage::new();

        let mut session = Session::new("session1".to_string());
        assert_eq!(session.wizard_state(), WizardState::NoShop);

        let shop = shops.get("shop_001").cloned().unwrap();
        session.select_shop(shop.clone());
        assert_eq!(session.wizard_state(), WizardState::ShopSelected);

        session.store_content(GeneratedContent {
            treatment_info: TreatmentInfo {
                services: vec!["カット".to_string()],
                ..TreatmentInfo::default()
            },
            ai_proposal: "（デモ）提案文".to_string(),
        });
        assert_eq!(session.wizard_state(), WizardState::ContentGenerated);

        storage.save(session).await.unwrap();
        let loaded = storage.get("session1").await.unwrap().unwrap();
        assert_eq!(loaded.shop, Some(shop));

        storage.delete("session1").await.unwrap();
        assert!(storage.get("session1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reselecting_a_shop_keeps_generated_content() {
        let shops = ShopDirectory::builtin();
        let mut session = Session::new("session2".to_string());

        session.select_shop(shops.get("shop_001").cloned().unwrap());
        session.store_content(GeneratedContent {
            treatment_info: TreatmentInfo::default(),
            ai_proposal: "提案".to_string(),
        });

        session.select_shop(shops.get("shop_002").cloned().unwrap());
        assert_eq!(session.wizard_state(), WizardState::ContentGenerated);
        assert_eq!(session.shop.as_ref().map(|s| s.id.as_str()), Some("shop_002"));
        assert!(session.content.is_some());
    }

    #[test]
    fn wizard_states_are_ordered() {
        assert!(WizardState::NoShop < WizardState::ShopSelected);
        assert!(WizardState::ShopSelected < WizardState::ContentGenerated);
    }
}
