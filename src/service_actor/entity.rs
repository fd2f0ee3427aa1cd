use super::actions::ServiceAction;
use crate::actor_framework::Entity;
use crate::domain::{Rating, Service, ServiceCreate, ServicePatch};

const MIN_NAME_CHARS: usize = 3;
const MIN_DESCRIPTION_CHARS: usize = 10;

impl Entity for Service {
    type Id = String;
    type CreateParams = ServiceCreate;
    type Patch = ServicePatch;
    type Action = ServiceAction;
    type ActionResult = Service;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Service, trimming text fields.
    ///
    /// # Errors
    /// Rejects short names or descriptions and negative prices.
    fn from_create_params(id: String, params: ServiceCreate) -> Result<Self, String> {
        let service = Self {
            id,
            name: params.name.trim().to_string(),
            description: params.description.trim().to_string(),
            price: params.price,
            department_id: params.department_id,
            rating: None,
        };
        service.check_schema()?;
        Ok(service)
    }

    /// Applies an admin patch. The patch is validated as a whole before any
    /// field changes.
    fn on_update(&mut self, patch: ServicePatch) -> Result<(), String> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            next.description = description.trim().to_string();
        }
        if let Some(price) = patch.price {
            next.price = price;
        }
        if let Some(department_id) = patch.department_id {
            next.department_id = Some(department_id);
        }
        next.check_schema()?;
        *self = next;
        Ok(())
    }

    fn handle_action(&mut self, action: ServiceAction) -> Result<Service, String> {
        match action {
            ServiceAction::RecordRating { average, count } => {
                if !(0.0..=5.0).contains(&average) {
                    return Err(format!("Rating average out of range: {}", average));
                }
                self.rating = Some(Rating { average, count });
                Ok(self.clone())
            }
        }
    }
}

impl Service {
    fn check_schema(&self) -> Result<(), String> {
        if self.name.chars().count() < MIN_NAME_CHARS {
            return Err(format!("Service name must be at least {} characters", MIN_NAME_CHARS));
        }
        if self.description.chars().count() < MIN_DESCRIPTION_CHARS {
            return Err(format!(
                "Service description must be at least {} characters",
                MIN_DESCRIPTION_CHARS
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("Service price must be a non-negative number".to_string());
        }
        Ok(())
    }
}
