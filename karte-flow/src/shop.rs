use serde::{Deserialize, Serialize};

/// A salon location with its public review link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub salon_name: String,
    pub url: String,
}

/// Immutable directory of the salons this deployment serves.
///
/// Built once at startup; lookup by id is the only operation.
pub struct ShopDirectory {
    shops: Vec<Shop>,
}

impl ShopDirectory {
    pub fn new(shops: Vec<Shop>) -> Self {
        Self { shops }
    }

    /// The built-in shop set.
    pub fn builtin() -> Self {
        Self::new(vec![
            Shop {
                id: "shop_001".to_string(),
                salon_name: "Review Salon Aoyama".to_string(),
                url: "https://g.page/r/example1/review".to_string(),
            },
            Shop {
                id: "shop_002".to_string(),
                salon_name: "Review Salon Shibuya".to_string(),
                url: "https://g.page/r/example2/review".to_string(),
            },
            Shop {
                id: "shop_003".to_string(),
                salon_name: "Review Salon Ginza".to_string(),
                url: "https://g.page/r/example3/review".to_string(),
            },
        ])
    }

    pub fn get(&self, shop_id: &str) -> Option<&Shop> {
        self.shops.iter().find(|shop| shop.id == shop_id)
    }

    pub fn all(&self) -> &[Shop] {
        &self.shops
    }
}
