//! Headless GeoZone session.
//!
//! Drives a scripted draw/edit/delete session against the in-memory surface
//! and prints the resulting zone list. A real deployment would wire the same
//! engine to an interactive map widget.

use geozone_core::{
    Color, DraftEdit, GeometrySurface, LatLng, MemorySurface, SurfaceEvent, SyncEngine,
    ZoneGeometry,
};

fn main() {
    env_logger::init();
    log::info!("Starting GeoZone");

    let mut surface = MemorySurface::new();
    let mut engine = SyncEngine::new();

    // Submitting the form before anything is drawn is a user error.
    if let Err(err) = engine.on_form_commit(&mut surface) {
        log::warn!("{err}");
    }

    // The operator fills the form and draws a polygon around the old town.
    engine.set_field(DraftEdit::Title("Old town".to_string()));
    engine.set_field(DraftEdit::Description("pedestrian area".to_string()));
    engine.set_field(DraftEdit::Color(
        Color::from_hex("#cc3300").expect("valid hex literal"),
    ));
    let polygon = ZoneGeometry::Polygon {
        ring: vec![
            LatLng::new(41.311, 69.240),
            LatLng::new(41.315, 69.240),
            LatLng::new(41.315, 69.248),
            LatLng::new(41.311, 69.248),
        ],
    };
    let kind = polygon.kind();
    let handle = surface.add_shape(polygon);
    engine.apply(&mut surface, SurfaceEvent::Created { kind, handle });

    // A second zone, drawn with the circle tool and left untitled.
    let circle = ZoneGeometry::Circle {
        center: LatLng::new(41.299, 69.240),
        radius: 400.0,
    };
    let kind = circle.kind();
    let circle_handle = surface.add_shape(circle);
    engine.apply(
        &mut surface,
        SurfaceEvent::Created {
            kind,
            handle: circle_handle,
        },
    );

    // The circle gets dragged to a new spot; the record follows.
    surface.update_shape(
        circle_handle,
        ZoneGeometry::Circle {
            center: LatLng::new(41.301, 69.245),
            radius: 400.0,
        },
    );
    engine.apply(
        &mut surface,
        SurfaceEvent::Edited {
            handles: vec![circle_handle],
        },
    );

    // Edit the untitled circle from the list view and recolor it.
    if let Some(circle_id) = surface.tag(circle_handle) {
        engine.begin_edit(&mut surface, circle_id);
        engine.set_field(DraftEdit::Title("Depot perimeter".to_string()));
        engine.set_field(DraftEdit::Color(
            Color::from_hex("#22aa55").expect("valid hex literal"),
        ));
        if let Err(err) = engine.on_form_commit(&mut surface) {
            log::warn!("{err}");
        }
    }

    // Delete the polygon from the list; its shape leaves the surface too.
    if let Some(polygon_id) = surface.tag(handle) {
        if let Err(err) = engine.delete_zone(&mut surface, polygon_id) {
            log::warn!("{err}");
        }
    }

    println!(
        "{} zone(s), {} shape(s) on the surface",
        engine.store().len(),
        surface.len()
    );
    match engine.store().to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("failed to serialize zone list: {err}"),
    }
    println!("{}", engine.store().to_geojson());
}
