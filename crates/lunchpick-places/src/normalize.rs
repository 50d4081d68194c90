//! Mapping API place details onto cache records.

use chrono::{DateTime, Utc};
use lunchpick_core::{EnrichmentRecord, Review};

use crate::types::PlaceDetails;

/// Convert API details into a cache record stamped `cached_at`.
///
/// The first photo and the first review with any text are kept.
#[must_use]
pub fn to_enrichment_record(details: &PlaceDetails, cached_at: DateTime<Utc>) -> EnrichmentRecord {
    let review = details
        .reviews
        .iter()
        .find(|r| !r.text.trim().is_empty())
        .map(|r| Review {
            text: r.text.trim().to_string(),
            author: r.author_name.clone(),
            rating: r.rating,
        });

    EnrichmentRecord {
        rating: details.rating,
        rating_count: details.user_ratings_total,
        photo_reference: details.photos.first().map(|p| p.photo_reference.clone()),
        review,
        is_closed: is_closed(details.business_status.as_deref()),
        cached_at,
    }
}

fn is_closed(business_status: Option<&str>) -> bool {
    matches!(
        business_status,
        Some("CLOSED_TEMPORARILY" | "CLOSED_PERMANENTLY")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Photo, PlaceReview};

    fn details() -> PlaceDetails {
        PlaceDetails {
            name: Some("Joe's Pizza".to_string()),
            rating: Some(4.4),
            user_ratings_total: Some(812),
            photos: vec![
                Photo {
                    photo_reference: "first".to_string(),
                    width: Some(800),
                    height: Some(600),
                },
                Photo {
                    photo_reference: "second".to_string(),
                    width: None,
                    height: None,
                },
            ],
            reviews: vec![
                PlaceReview {
                    author_name: "Quiet".to_string(),
                    rating: Some(3.0),
                    text: "   ".to_string(),
                },
                PlaceReview {
                    author_name: "Alex".to_string(),
                    rating: Some(5.0),
                    text: " Great crust. ".to_string(),
                },
            ],
            business_status: Some("OPERATIONAL".to_string()),
        }
    }

    #[test]
    fn maps_all_fields() {
        let now = Utc::now();
        let record = to_enrichment_record(&details(), now);
        assert_eq!(record.rating, Some(4.4));
        assert_eq!(record.rating_count, Some(812));
        assert_eq!(record.photo_reference.as_deref(), Some("first"));
        let review = record.review.unwrap();
        assert_eq!(review.author, "Alex");
        assert_eq!(review.text, "Great crust.");
        assert_eq!(review.rating, Some(5.0));
        assert!(!record.is_closed);
        assert_eq!(record.cached_at, now);
    }

    #[test]
    fn closed_statuses() {
        assert!(is_closed(Some("CLOSED_TEMPORARILY")));
        assert!(is_closed(Some("CLOSED_PERMANENTLY")));
        assert!(!is_closed(Some("OPERATIONAL")));
        assert!(!is_closed(None));
    }

    #[test]
    fn empty_details_map_to_empty_record() {
        let record = to_enrichment_record(&PlaceDetails::default(), Utc::now());
        assert!(record.rating.is_none());
        assert!(record.photo_reference.is_none());
        assert!(record.review.is_none());
    }
}
