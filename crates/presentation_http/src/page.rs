//! Server-rendered form page
//!
//! The page is a single tera template compiled into the binary. It is
//! rendered with the caller's session so a reload shows the current
//! locations; everything after that goes through the JSON API.

use domain::{LocationSlot, PassengerCount, PickupDateTime, ServiceArea, TripSession};
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const INDEX_NAME: &str = "index.html";

/// Errors from page rendering
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

#[derive(Debug, Serialize)]
struct LocationView<'a> {
    slot: &'static str,
    title: &'static str,
    placeholder: &'static str,
    latitude: f64,
    longitude: f64,
    label: &'a str,
    query: &'a str,
}

impl<'a> LocationView<'a> {
    fn new(session: &'a TripSession, slot: LocationSlot) -> Self {
        let location = session.location(slot);
        let (title, placeholder) = match slot {
            LocationSlot::Pickup => ("Pickup", "e.g. Times Square, Central Park..."),
            LocationSlot::Dropoff => ("Dropoff", "e.g. JFK Airport, Brooklyn Bridge..."),
        };
        Self {
            slot: slot.as_str(),
            title,
            placeholder,
            latitude: location.latitude(),
            longitude: location.longitude(),
            label: location.label(),
            query: session.query(slot),
        }
    }
}

#[derive(Debug, Serialize)]
struct FormDefaults {
    passengers: u8,
    min_passengers: u8,
    max_passengers: u8,
    date: String,
    time: String,
}

/// Renders the HTML page
#[derive(Debug)]
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Compile the embedded template
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not parse.
    pub fn new() -> Result<Self, PageError> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX_NAME, INDEX_TEMPLATE)?;
        Ok(Self { tera })
    }

    /// Render the page for one session
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render_index(&self, session: &TripSession) -> Result<String, PageError> {
        let pickup_at = PickupDateTime::default();
        let center = session.map_center();

        let pickup = LocationView::new(session, LocationSlot::Pickup);
        let dropoff = LocationView::new(session, LocationSlot::Dropoff);

        let mut context = Context::new();
        context.insert("pickup", &pickup);
        context.insert("dropoff", &dropoff);
        context.insert("slots", &[&pickup, &dropoff]);
        context.insert("center_latitude", &center.latitude());
        context.insert("center_longitude", &center.longitude());
        context.insert("area", &ServiceArea::NEW_YORK_CITY);
        context.insert(
            "form",
            &FormDefaults {
                passengers: PassengerCount::DEFAULT,
                min_passengers: PassengerCount::MIN,
                max_passengers: PassengerCount::MAX,
                date: pickup_at.date_string(),
                time: pickup_at.time_string(),
            },
        );
        context.insert("version", env!("CARGO_PKG_VERSION"));

        Ok(self.tera.render(INDEX_NAME, &context)?)
    }
}
