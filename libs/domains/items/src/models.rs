use axum_helpers::errors::validation_message;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::ItemError;

/// Message for a body without a usable name or description.
pub const MISSING_FIELDS: &str = "Missing name or description";

/// Stored item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Assigned by storage, never changes
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// Name and description that passed validation; what repositories persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
}

impl NewItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// DTO for creating an item
///
/// Both fields are optional at the serde level so a missing key reaches
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_item", skip_on_field_errors = false))]
pub struct CreateItem {
    #[schema(max_length = 100)]
    #[validate(length(max = 100, message = "name is too long"))]
    pub name: Option<String>,
    #[schema(max_length = 200)]
    #[validate(length(max = 200, message = "description is too long"))]
    pub description: Option<String>,
}

/// DTO for replacing an item's name and description
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_item", skip_on_field_errors = false))]
pub struct UpdateItem {
    #[schema(max_length = 100)]
    #[validate(length(max = 100, message = "name is too long"))]
    pub name: Option<String>,
    #[schema(max_length = 200)]
    #[validate(length(max = 200, message = "description is too long"))]
    pub description: Option<String>,
}

/// `{"message": "..."}` acknowledgement for writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

fn require_both(name: &Option<String>, description: &Option<String>) -> Result<(), ValidationError> {
    if is_blank(name) || is_blank(description) {
        return Err(ValidationError::new("missing").with_message(Cow::Borrowed(MISSING_FIELDS)));
    }
    Ok(())
}

fn validate_create_item(input: &CreateItem) -> Result<(), ValidationError> {
    require_both(&input.name, &input.description)
}

fn validate_update_item(input: &UpdateItem) -> Result<(), ValidationError> {
    require_both(&input.name, &input.description)
}

fn first_message(errors: validator::ValidationErrors) -> ItemError {
    ItemError::Validation(validation_message(&errors).unwrap_or_else(|| MISSING_FIELDS.to_string()))
}

fn into_new_item(name: Option<String>, description: Option<String>) -> Result<NewItem, ItemError> {
    match (name, description) {
        (Some(name), Some(description)) => Ok(NewItem { name, description }),
        _ => Err(ItemError::Validation(MISSING_FIELDS.to_string())),
    }
}

impl TryFrom<CreateItem> for NewItem {
    type Error = ItemError;

    fn try_from(input: CreateItem) -> Result<Self, Self::Error> {
        input.validate().map_err(first_message)?;
        into_new_item(input.name, input.description)
    }
}

impl TryFrom<UpdateItem> for NewItem {
    type Error = ItemError;

    fn try_from(input: UpdateItem) -> Result<Self, Self::Error> {
        input.validate().map_err(first_message)?;
        into_new_item(input.name, input.description)
    }
}
