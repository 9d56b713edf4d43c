use crate::config::ImageSettings;
use crate::models::RestaurantResult;

/// Decides whether an image URL looks like a real photo of the restaurant.
///
/// The deny-list is plain configuration: case-insensitive substrings of
/// stock/placeholder hosts.
#[derive(Debug, Clone)]
pub struct ImagePolicy {
    deny_list: Vec<String>,
    placeholder_url: String,
}

impl ImagePolicy {
    pub fn new(deny_list: Vec<String>, placeholder_url: impl Into<String>) -> Self {
        Self {
            deny_list: deny_list.into_iter().map(|d| d.to_lowercase()).collect(),
            placeholder_url: placeholder_url.into(),
        }
    }

    pub fn from_settings(settings: &ImageSettings) -> Self {
        Self::new(settings.deny_list.clone(), settings.placeholder_url.clone())
    }

    pub fn is_real_image(&self, url: &str) -> bool {
        let lowered = url.trim().to_lowercase();
        lowered.starts_with("http") && !self.deny_list.iter().any(|d| lowered.contains(d.as_str()))
    }

    /// The URL to display: the record's own image if acceptable, else the placeholder
    pub fn display_url<'a>(&'a self, image_url: Option<&'a str>) -> &'a str {
        match image_url {
            Some(url) if self.is_real_image(url) => url,
            Some(url) => {
                tracing::warn!("Rejected placeholder image URL: {}", url);
                &self.placeholder_url
            }
            None => &self.placeholder_url,
        }
    }
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self::from_settings(&ImageSettings::default())
    }
}

/// Display-ready fields for one result card
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantCard {
    pub name: String,
    pub address: String,
    pub image_url: String,
    pub rating: String,
    pub budget: String,
    pub phone: Option<String>,
    pub cuisines: Vec<String>,
    pub matching_items: Vec<String>,
    pub menu_link: Option<String>,
    pub website_url: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}

impl RestaurantCard {
    pub fn build(restaurant: &RestaurantResult, images: &ImagePolicy) -> Self {
        Self {
            name: restaurant.name.clone(),
            address: restaurant.address.clone(),
            image_url: images.display_url(restaurant.image_url.as_deref()).to_string(),
            rating: restaurant
                .known_rating()
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "N/A".to_string()),
            budget: non_empty(restaurant.budget.as_deref()).unwrap_or_else(|| "N/A".to_string()),
            phone: non_empty(restaurant.phone.as_deref()),
            cuisines: restaurant.cuisines.clone(),
            matching_items: if restaurant.matching_items.is_empty() {
                vec!["No items available".to_string()]
            } else {
                restaurant.matching_items.clone()
            },
            menu_link: non_empty(restaurant.menu_link.as_deref()),
            website_url: non_empty(restaurant.website_url.as_deref()),
        }
    }
}
