use crate::modules::restaurant::repository::{FoodCategory, RestaurantType};
use std::borrow::Cow;
use validator::ValidationError;

pub fn validate_restaurant_type(value: &str) -> Result<(), ValidationError> {
    value.parse::<RestaurantType>().map(|_| ()).map_err(|_| {
        ValidationError::new("INVALID_RESTAURANT_TYPE").with_message(Cow::from(
            "Restaurant type must be one of fast-food, casual-dining, fine-dining, cafe or food-truck",
        ))
    })
}

pub fn validate_food_category(value: &str) -> Result<(), ValidationError> {
    value.parse::<FoodCategory>().map(|_| ()).map_err(|_| {
        ValidationError::new("INVALID_FOOD_CATEGORY")
            .with_message(Cow::from("Unsupported food category"))
    })
}
