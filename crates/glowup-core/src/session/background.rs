//! The fixed Home-screen background rotation set.

use std::time::Duration;

/// One entry of the Home background carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeBackground {
    pub id: &'static str,
    pub label: &'static str,
    pub url: &'static str,
}

/// How often the Home carousel advances.
pub const ROTATION_PERIOD: Duration = Duration::from_secs(6);

/// The fixed demographic background set cycled on the Home screen.
pub const HOME_BACKGROUNDS: [HomeBackground; 6] = [
    HomeBackground {
        id: "ref-female",
        label: "STYLE",
        url: "https://images.unsplash.com/photo-1515886657613-9f3515b0c78f?auto=format&fit=crop&q=80&w=1000",
    },
    HomeBackground {
        id: "male-model",
        label: "MALE",
        url: "https://images.unsplash.com/photo-1503443207922-dff7d543fd0e?auto=format&fit=crop&q=80&w=1000",
    },
    HomeBackground {
        id: "boys",
        label: "BOYS",
        url: "https://images.unsplash.com/photo-1488161628813-04466f872be2?auto=format&fit=crop&q=80&w=1000",
    },
    HomeBackground {
        id: "girls",
        label: "GIRLS",
        url: "https://images.unsplash.com/photo-1529139513055-07f9127e6db2?auto=format&fit=crop&q=80&w=1000",
    },
    HomeBackground {
        id: "men-mid",
        label: "MEN",
        url: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&q=80&w=1000",
    },
    HomeBackground {
        id: "women-mid",
        label: "WOMEN",
        url: "https://images.unsplash.com/photo-1487412720507-e7ab37603c6f?auto=format&fit=crop&q=80&w=1000",
    },
];
