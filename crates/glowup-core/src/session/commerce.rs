//! Nearby services, booking, and shop destinations.
//!
//! Booking is a local-only simulation: submission always succeeds and no
//! network call is made. The service catalog is fixed, keyed by the
//! detected gender.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Gender;

/// A nearby salon / beauty parlor / store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyService {
    pub name: String,
    pub rating: f32,
    pub distance: String,
    pub offer: Option<String>,
}

impl NearbyService {
    fn new(name: &str, rating: f32, distance: &str, offer: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            rating,
            distance: distance.to_string(),
            offer: offer.map(str::to_string),
        }
    }
}

/// The heading shown above the nearby-services list.
pub fn nearby_heading(gender: Option<Gender>) -> &'static str {
    match gender {
        Some(Gender::Male) => "Find Nearby Salons",
        _ => "Find Nearby Beauty Parlors & Stores",
    }
}

/// The fixed nearby-service catalog for the detected gender.
pub fn nearby_services(gender: Option<Gender>) -> Vec<NearbyService> {
    match gender {
        Some(Gender::Male) => vec![
            NearbyService::new("The Gentleman's Cut", 4.9, "0.8 km", Some("15% OFF")),
            NearbyService::new("Urban Salon & Spa", 4.7, "1.2 km", None),
            NearbyService::new("Classic Clippers", 4.5, "2.5 km", Some("New Store Offer")),
        ],
        _ => vec![
            NearbyService::new("Radiance Beauty Parlor", 4.9, "0.5 km", Some("First Visit -20%")),
            NearbyService::new("Glamour Haven Store", 4.8, "1.0 km", None),
            NearbyService::new("Essence Wellness Center", 4.6, "3.2 km", Some("Membership Deal")),
        ],
    }
}

/// A booking-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub customer_name: String,
    pub phone: String,
    pub requested_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// A retailer destination offered in the shop overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetailerLink {
    pub label: &'static str,
    pub url: &'static str,
    pub perk: Option<&'static str>,
}

/// The fixed retailer destinations for "shop this style".
pub const RETAILER_LINKS: [RetailerLink; 2] = [
    RetailerLink {
        label: "Amazon",
        url: "https://amazon.com",
        perk: Some("-20% OFF"),
    },
    RetailerLink {
        label: "Flipkart",
        url: "https://flipkart.com",
        perk: Some("★ 4.8 Rating"),
    },
];
