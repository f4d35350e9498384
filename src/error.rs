use thiserror::Error;

/// Why a story submission was rejected before reaching the database.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i32),

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewStory;

    fn submission() -> NewStory {
        NewStory {
            title: "From dog walks to a pet-sitting crew".to_string(),
            author: "Noor Haddad".to_string(),
            hustle: "Pet sitting".to_string(),
            body: "Two clients became twenty within a year.".to_string(),
            rating: 5,
            category: "local-services".to_string(),
        }
    }

    #[test]
    fn accepts_complete_submission() {
        assert_eq!(submission().validate(), Ok(()));
    }

    #[test]
    fn rejects_blank_fields() {
        let story = NewStory {
            hustle: "   ".to_string(),
            ..submission()
        };
        assert_eq!(
            story.validate(),
            Err(SubmissionError::EmptyField { field: "hustle" })
        );
    }

    #[test]
    fn rejects_rating_outside_one_to_five() {
        for rating in [0, 6, -1] {
            let story = NewStory {
                rating,
                ..submission()
            };
            assert_eq!(
                story.validate(),
                Err(SubmissionError::RatingOutOfRange(rating))
            );
        }
    }

    #[test]
    fn rejects_unlisted_category() {
        let story = NewStory {
            category: "lottery".to_string(),
            ..submission()
        };
        assert_eq!(
            story.validate(),
            Err(SubmissionError::UnknownCategory("lottery".to_string()))
        );
    }

    #[test]
    fn padded_fields_are_trimmed_before_storage() {
        let story = NewStory {
            title: "  From dog walks to a pet-sitting crew ".to_string(),
            category: " tech".to_string(),
            ..submission()
        }
        .normalized();

        assert_eq!(story.validate(), Ok(()));
        assert_eq!(story.category, "tech");
        assert_eq!(story.title, "From dog walks to a pet-sitting crew");
        assert_eq!(story.rating, 5);
    }
}
