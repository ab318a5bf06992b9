use crate::error::ValidationError;
use crate::event::CompletionEvent;
use crate::script::FeedbackStep;

/// Rating and comment state for an active feedback step.
#[derive(Debug)]
pub struct FeedbackSession {
    step: FeedbackStep,
    rating: Option<u8>,
    comment: String,
}

impl FeedbackSession {
    pub fn new(step: &FeedbackStep) -> Self {
        Self {
            step: step.clone(),
            rating: None,
            comment: String::new(),
        }
    }

    /// Records a star rating, clamped to the 1-5 scale.
    pub fn set_rating(&mut self, stars: u8) {
        self.rating = Some(stars.clamp(1, 5));
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn set_comment(&mut self, text: impl Into<String>) {
        self.comment = text.into();
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Submits the feedback. When a rating is collected it is required;
    /// success is `rating >= min_rating` when a threshold is configured and
    /// unconditional otherwise, resolving to `success_next`/`fail_next` by
    /// the flag (either may be absent, deferring to the remaining rules).
    pub fn confirm(&self) -> Result<CompletionEvent, ValidationError> {
        if self.step.rating && self.rating.is_none() {
            return Err(ValidationError::MissingRating);
        }

        let success = match self.step.min_rating {
            Some(threshold) if self.step.rating => {
                self.rating.is_some_and(|stars| stars >= threshold)
            }
            _ => true,
        };

        let target = if success {
            self.step.success_next
        } else {
            self.step.fail_next
        };

        let mut event = CompletionEvent::targeted(success, target);
        if self.step.rating {
            event.rating = self.rating;
        }
        if self.step.comment && !self.comment.is_empty() {
            event.comment = Some(self.comment.clone());
        }
        Ok(event)
    }
}
