use crate::actor_framework::Entity;
use crate::domain::{Review, ReviewCreate};
use chrono::Utc;

const MIN_COMMENT_CHARS: usize = 5;

impl Entity for Review {
    type Id = String;
    type CreateParams = ReviewCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: ReviewCreate) -> Result<Self, String> {
        let user_name = params.user_name.trim().to_string();
        let comment = params.comment.trim().to_string();
        if user_name.is_empty() {
            return Err("Reviewer name is required".to_string());
        }
        if !(1..=5).contains(&params.rating) {
            return Err(format!("Rating must be between 1 and 5, got {}", params.rating));
        }
        if comment.chars().count() < MIN_COMMENT_CHARS {
            return Err(format!("Comment must be at least {} characters", MIN_COMMENT_CHARS));
        }
        Ok(Self {
            id,
            service_id: params.service_id,
            user_name,
            rating: params.rating,
            comment,
            created_at: Utc::now(),
        })
    }

    /// One review per reviewer per service.
    fn conflicts_with(&self, existing: &Self) -> bool {
        self.service_id == existing.service_id && self.user_name == existing.user_name
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
