//! Hover and click selection over the quake and city layers
//!
//! The controller tracks at most one hovered and at most one pinned marker
//! across both layers and mirrors that state into each marker's
//! [`ViewState`]. Pinning a marker isolates it: only the marker itself and
//! the markers on the other layer that fall inside the relevant threat
//! circle stay visible.
//!
//! Hit testing is delegated to the host through [`HitTest`]; hidden markers
//! are never hit, for hovering or clicking.

use quakemap_core::Location;
use tracing::{debug, trace};

use crate::marker::{HazardMarker, HazardSetting, MarkerId, MarkerRef, PlaceMarker, ViewState};
use crate::threat::within_influence;

/// Screen-space hit test supplied by the renderer.
pub trait HitTest {
    /// True if screen point `(x, y)` falls on the drawn `marker`.
    fn is_inside(&self, marker: MarkerRef<'_>, x: f32, y: f32) -> bool;
}

impl<F> HitTest for F
where
    F: Fn(MarkerRef<'_>, f32, f32) -> bool,
{
    fn is_inside(&self, marker: MarkerRef<'_>, x: f32, y: f32) -> bool {
        self(marker, x, y)
    }
}

/// Equirectangular viewport: longitude -180..180 spans `width` pixels from
/// `left`, latitude 90..-90 spans `height` pixels from `top`.
///
/// A marker is hit when the pointer is within its drawn radius of the
/// projected location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedHitTest {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ProjectedHitTest {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn project(&self, loc: &Location) -> (f32, f32) {
        let x = self.left + ((loc.lon + 180.0) / 360.0) as f32 * self.width;
        let y = self.top + ((90.0 - loc.lat) / 180.0) as f32 * self.height;
        (x, y)
    }

    pub fn unproject(&self, x: f32, y: f32) -> Location {
        let lon = ((x - self.left) / self.width) as f64 * 360.0 - 180.0;
        let lat = 90.0 - ((y - self.top) / self.height) as f64 * 180.0;
        Location::new(lat, lon)
    }
}

impl Default for ProjectedHitTest {
    fn default() -> Self {
        Self::new(0.0, 0.0, 900.0, 700.0)
    }
}

impl HitTest for ProjectedHitTest {
    fn is_inside(&self, marker: MarkerRef<'_>, x: f32, y: f32) -> bool {
        let (mx, my) = self.project(&marker.location());
        let dx = (x - mx) as f64;
        let dy = (y - my) as f64;
        let r = marker.screen_radius();
        dx * dx + dy * dy <= r * r
    }
}

/// Pointer input delivered by the host's event loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved { x: f32, y: f32 },
    Clicked { x: f32, y: f32 },
}

/// The two marker collections the controller works on.
#[derive(Debug, Clone, Default)]
pub struct MarkerLayers {
    pub hazards: Vec<HazardMarker>,
    pub places: Vec<PlaceMarker>,
}

impl MarkerLayers {
    pub fn new(hazards: Vec<HazardMarker>, places: Vec<PlaceMarker>) -> Self {
        Self { hazards, places }
    }

    pub fn get(&self, id: MarkerId) -> Option<MarkerRef<'_>> {
        match id {
            MarkerId::Hazard(i) => self.hazards.get(i).map(MarkerRef::Hazard),
            MarkerId::Place(i) => self.places.get(i).map(MarkerRef::Place),
        }
    }

    pub fn view(&self, id: MarkerId) -> Option<ViewState> {
        self.get(id).map(|m| m.view())
    }

    fn view_mut(&mut self, id: MarkerId) -> Option<&mut ViewState> {
        match id {
            MarkerId::Hazard(i) => self.hazards.get_mut(i).map(|m| &mut m.view),
            MarkerId::Place(i) => self.places.get_mut(i).map(|m| &mut m.view),
        }
    }

    /// Every marker, quakes first, in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerId, MarkerRef<'_>)> + '_ {
        let hazards = self
            .hazards
            .iter()
            .enumerate()
            .map(|(i, m)| (MarkerId::Hazard(i), MarkerRef::Hazard(m)));
        let places = self
            .places
            .iter()
            .enumerate()
            .map(|(i, m)| (MarkerId::Place(i), MarkerRef::Place(m)));
        hazards.chain(places)
    }

    /// Markers the renderer should draw.
    pub fn visible(&self) -> impl Iterator<Item = (MarkerId, MarkerRef<'_>)> + '_ {
        self.iter().filter(|(_, m)| !m.view().hidden)
    }

    fn set_all_hidden(&mut self, hidden: bool) {
        for m in &mut self.hazards {
            m.view.hidden = hidden;
        }
        for m in &mut self.places {
            m.view.hidden = hidden;
        }
    }
}

/// Hover/pin state machine.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    hovered: Option<MarkerId>,
    pinned: Option<MarkerId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    pub fn pinned(&self) -> Option<MarkerId> {
        self.pinned
    }

    pub fn handle<H: HitTest + ?Sized>(&mut self, event: PointerEvent, layers: &mut MarkerLayers, hit: &H) {
        match event {
            PointerEvent::Moved { x, y } => self.pointer_moved(x, y, layers, hit),
            PointerEvent::Clicked { x, y } => self.pointer_clicked(x, y, layers, hit),
        }
    }

    /// Move the hover highlight to the first visible marker under the
    /// pointer, or clear it.
    pub fn pointer_moved<H: HitTest + ?Sized>(&mut self, x: f32, y: f32, layers: &mut MarkerLayers, hit: &H) {
        if let Some(prev) = self.hovered.take() {
            if let Some(view) = layers.view_mut(prev) {
                view.hovered = false;
            }
        }

        self.hovered = first_hit(layers, hit, x, y);
        if let Some(id) = self.hovered {
            if let Some(view) = layers.view_mut(id) {
                view.hovered = true;
            }
            trace!("Hovering {}", id);
        }
    }

    /// Pin the first visible marker under the pointer and isolate it, or
    /// clear the pin and show everything when the click hits nothing.
    ///
    /// The hit is resolved against what was visible before the click.
    pub fn pointer_clicked<H: HitTest + ?Sized>(&mut self, x: f32, y: f32, layers: &mut MarkerLayers, hit: &H) {
        let target = first_hit(layers, hit, x, y);

        if let Some(prev) = self.pinned.take() {
            if let Some(view) = layers.view_mut(prev) {
                view.pinned = false;
            }
        }
        layers.set_all_hidden(false);

        let Some(id) = target else {
            debug!("Click on empty map, showing all markers");
            return;
        };

        self.pinned = Some(id);
        isolate(layers, id);
        // Hidden markers cannot stay hovered.
        if let Some(hovered) = self.hovered {
            if layers.view(hovered).is_some_and(|v| v.hidden) {
                if let Some(view) = layers.view_mut(hovered) {
                    view.hovered = false;
                }
                self.hovered = None;
            }
        }
        debug!(
            "Pinned {}: {} of {} markers visible",
            id,
            layers.visible().count(),
            layers.hazards.len() + layers.places.len()
        );
    }

    /// Lines the map draws from the pinned marker: a pinned city links to the
    /// visible off-land quakes, a pinned off-land quake links to the visible
    /// cities. On-land quakes draw no links.
    pub fn threat_links(&self, layers: &MarkerLayers) -> Vec<(MarkerId, MarkerId)> {
        let Some(pinned) = self.pinned else {
            return Vec::new();
        };
        let Some(marker) = layers.get(pinned) else {
            return Vec::new();
        };

        match marker {
            MarkerRef::Place(_) => layers
                .hazards
                .iter()
                .enumerate()
                .filter(|(_, h)| !h.view.hidden && *h.setting() == HazardSetting::OffLand)
                .map(|(i, _)| (pinned, MarkerId::Hazard(i)))
                .collect(),
            MarkerRef::Hazard(h) if !h.is_on_land() => layers
                .places
                .iter()
                .enumerate()
                .filter(|(_, p)| !p.view.hidden)
                .map(|(i, _)| (pinned, MarkerId::Place(i)))
                .collect(),
            MarkerRef::Hazard(_) => Vec::new(),
        }
    }
}

/// First visible marker under `(x, y)`: quakes are scanned before cities.
fn first_hit<H: HitTest + ?Sized>(layers: &MarkerLayers, hit: &H, x: f32, y: f32) -> Option<MarkerId> {
    layers
        .visible()
        .find(|(_, m)| hit.is_inside(*m, x, y))
        .map(|(id, _)| id)
}

/// Hide everything, then show the pinned marker and whatever is on the
/// other side of its threat relation.
fn isolate(layers: &mut MarkerLayers, pinned: MarkerId) {
    layers.set_all_hidden(true);

    match pinned {
        MarkerId::Place(i) => {
            if let Some(place) = layers.places.get(i) {
                let loc = place.location();
                for hazard in &mut layers.hazards {
                    if within_influence(hazard, &loc) {
                        hazard.view.hidden = false;
                    }
                }
            }
        }
        MarkerId::Hazard(i) => {
            if let Some(hazard) = layers.hazards.get(i) {
                for place in &mut layers.places {
                    if within_influence(hazard, &place.location()) {
                        place.view.hidden = false;
                    }
                }
            }
        }
    }

    if let Some(view) = layers.view_mut(pinned) {
        view.pinned = true;
        view.hidden = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerParams;
    use quakemap_core::Feature;

    /// Screen coordinates are (lon, lat); every marker has a 0.5 unit radius.
    struct DegreeHit;

    impl HitTest for DegreeHit {
        fn is_inside(&self, marker: MarkerRef<'_>, x: f32, y: f32) -> bool {
            let loc = marker.location();
            (loc.lon as f32 - x).abs() <= 0.5 && (loc.lat as f32 - y).abs() <= 0.5
        }
    }

    fn hazard(lat: f64, lon: f64, magnitude: f64, country: Option<&str>) -> HazardMarker {
        let mut f = Feature::new(Location::new(lat, lon))
            .with_property("magnitude", magnitude)
            .with_property("depth", 10.0);
        f.country = country.map(str::to_string);
        HazardMarker::new(f, &MarkerParams::default()).unwrap()
    }

    fn place(lat: f64, lon: f64, name: &str) -> PlaceMarker {
        PlaceMarker::new(Feature::new(Location::new(lat, lon)).with_property("name", name)).unwrap()
    }

    /// Magnitude 6 threat radius is ~1959 km (~17.6 degrees on the equator).
    fn layers() -> MarkerLayers {
        MarkerLayers::new(
            vec![
                hazard(0.0, 0.0, 6.0, None),
                hazard(0.0, 100.0, 6.0, Some("Far")),
                hazard(0.0, 10.0, 3.0, None),
            ],
            vec![place(0.0, 10.0, "Near"), place(0.0, 60.0, "Distant")],
        )
    }

    fn counts(layers: &MarkerLayers) -> (usize, usize) {
        let hovered = layers.iter().filter(|(_, m)| m.view().hovered).count();
        let pinned = layers.iter().filter(|(_, m)| m.view().pinned).count();
        (hovered, pinned)
    }

    #[test]
    fn test_hover_sets_and_clears() {
        let mut layers = layers();
        let mut ctl = SelectionController::new();

        ctl.pointer_moved(0.0, 0.0, &mut layers, &DegreeHit);
        assert_eq!(ctl.hovered(), Some(MarkerId::Hazard(0)));
        assert!(layers.hazards[0].view.hovered);

        ctl.pointer_moved(60.0, 0.0, &mut layers, &DegreeHit);
        assert_eq!(ctl.hovered(), Some(MarkerId::Place(1)));
        assert!(!layers.hazards[0].view.hovered);
        assert!(layers.places[1].view.hovered);

        ctl.pointer_moved(-50.0, 40.0, &mut layers, &DegreeHit);
        assert_eq!(ctl.hovered(), None);
        assert_eq!(counts(&layers), (0, 0));
    }

    #[test]
    fn test_hover_prefers_hazards() {
        // Quake #2 and city "Near" share a location
        let mut layers = layers();
        let mut ctl = SelectionController::new();
        ctl.pointer_moved(10.0, 0.0, &mut layers, &DegreeHit);
        assert_eq!(ctl.hovered(), Some(MarkerId::Hazard(2)));
        assert!(!layers.places[0].view.hovered);
    }

    #[test]
    fn test_pin_hazard_isolates_places_in_range() {
        let mut layers = layers();
        let mut ctl = SelectionController::new();

        ctl.pointer_clicked(0.0, 0.0, &mut layers, &DegreeHit);

        assert_eq!(ctl.pinned(), Some(MarkerId::Hazard(0)));
        assert!(layers.hazards[0].view.pinned);
        assert!(!layers.hazards[0].view.hidden);
        assert!(layers.hazards[1].view.hidden);
        assert!(layers.hazards[2].view.hidden);
        assert!(!layers.places[0].view.hidden, "city 1100 km away is threatened");
        assert!(layers.places[1].view.hidden, "city 6700 km away is safe");
    }

    #[test]
    fn test_pin_place_isolates_threatening_hazards() {
        let mut layers = layers();
        let mut ctl = SelectionController::new();

        // Quake #2 overlaps "Near" and wins the hit, so pin "Distant" instead
        ctl.pointer_clicked(60.0, 0.0, &mut layers, &DegreeHit);
        assert_eq!(ctl.pinned(), Some(MarkerId::Place(1)));
        assert!(layers.hazards.iter().all(|h| h.view.hidden));
        assert!(layers.places[0].view.hidden);
        assert!(!layers.places[1].view.hidden);

        // Move the pin: hazards threatening "Near"
        let mut layers = MarkerLayers::new(
            vec![hazard(0.0, 0.0, 6.0, None), hazard(0.0, 100.0, 6.0, None)],
            vec![place(0.0, 10.0, "Near")],
        );
        let mut ctl = SelectionController::new();
        ctl.pointer_clicked(10.0, 0.0, &mut layers, &DegreeHit);
        assert_eq!(ctl.pinned(), Some(MarkerId::Place(0)));
        assert!(!layers.hazards[0].view.hidden);
        assert!(layers.hazards[1].view.hidden);
    }

    #[test]
    fn test_click_empty_space_resets() {
        let mut layers = layers();
        let mut ctl = SelectionController::new();

        ctl.pointer_clicked(0.0, 0.0, &mut layers, &DegreeHit);
        assert!(layers.visible().count() < 5);

        ctl.pointer_clicked(-120.0, -45.0, &mut layers, &DegreeHit);
        assert_eq!(ctl.pinned(), None);
        assert_eq!(layers.visible().count(), 5);
        assert_eq!(counts(&layers).1, 0);
    }

    #[test]
    fn test_hidden_markers_are_not_hit() {
        let mut layers = layers();
        let mut ctl = SelectionController::new();

        ctl.pointer_clicked(0.0, 0.0, &mut layers, &DegreeHit);
        assert!(layers.places[1].view.hidden);

        ctl.pointer_moved(60.0, 0.0, &mut layers, &DegreeHit);
        assert_eq!(ctl.hovered(), None);

        // Clicking where the hidden city is behaves like an empty click
        ctl.pointer_clicked(60.0, 0.0, &mut layers, &DegreeHit);
        assert_eq!(ctl.pinned(), None);
        assert_eq!(layers.visible().count(), 5);
    }

    #[test]
    fn test_repin_moves_flag() {
        let mut layers = layers();
        let mut ctl = SelectionController::new();

        ctl.pointer_clicked(0.0, 0.0, &mut layers, &DegreeHit);
        // "Near" is visible under the pin of quake #0; quake #2 on top of it is hidden
        ctl.pointer_clicked(10.0, 0.0, &mut layers, &DegreeHit);

        assert_eq!(ctl.pinned(), Some(MarkerId::Place(0)));
        assert!(!layers.hazards[0].view.pinned);
        assert!(layers.places[0].view.pinned);
        assert_eq!(counts(&layers).1, 1);
    }

    #[test]
    fn test_hover_cleared_when_pin_hides_it() {
        let mut layers = layers();
        let mut ctl = SelectionController::new();

        ctl.pointer_moved(60.0, 0.0, &mut layers, &DegreeHit);
        assert_eq!(ctl.hovered(), Some(MarkerId::Place(1)));

        ctl.pointer_clicked(0.0, 0.0, &mut layers, &DegreeHit);
        assert_eq!(ctl.hovered(), None);
        assert!(!layers.places[1].view.hovered);
    }

    #[test]
    fn test_threat_links() {
        let mut layers = layers();
        let mut ctl = SelectionController::new();
        assert!(ctl.threat_links(&layers).is_empty());

        // Off-land quake links to visible cities
        ctl.pointer_clicked(0.0, 0.0, &mut layers, &DegreeHit);
        assert_eq!(
            ctl.threat_links(&layers),
            vec![(MarkerId::Hazard(0), MarkerId::Place(0))]
        );

        // On-land quake draws nothing
        ctl.pointer_clicked(-1.0, -1.0, &mut layers, &DegreeHit);
        ctl.pointer_clicked(100.0, 0.0, &mut layers, &DegreeHit);
        assert_eq!(ctl.pinned(), Some(MarkerId::Hazard(1)));
        assert!(ctl.threat_links(&layers).is_empty());
    }

    #[test]
    fn test_closure_hit_test() {
        let mut layers = layers();
        let mut ctl = SelectionController::new();
        let always_first = |m: MarkerRef<'_>, _x: f32, _y: f32| matches!(m, MarkerRef::Place(_));

        ctl.handle(PointerEvent::Moved { x: 0.0, y: 0.0 }, &mut layers, &always_first);
        assert_eq!(ctl.hovered(), Some(MarkerId::Place(0)));
    }

    #[test]
    fn test_projection_round_trip() {
        let view = ProjectedHitTest::default();
        let loc = Location::new(-33.45, -70.66);
        let (x, y) = view.project(&loc);
        let back = view.unproject(x, y);
        assert!((back.lat - loc.lat).abs() < 1e-3);
        assert!((back.lon - loc.lon).abs() < 1e-3);

        let center = view.project(&Location::new(0.0, 0.0));
        assert_eq!(center, (450.0, 350.0));
    }

    #[test]
    fn test_projected_hit_uses_marker_radius() {
        let view = ProjectedHitTest::default();
        let h = hazard(0.0, 0.0, 4.0, None); // radius 7 px
        let (x, y) = view.project(&h.location());
        assert!(view.is_inside(MarkerRef::Hazard(&h), x + 6.9, y));
        assert!(!view.is_inside(MarkerRef::Hazard(&h), x + 7.1, y));

        let p = place(0.0, 0.0, "Null Island"); // radius 5 px
        assert!(view.is_inside(MarkerRef::Place(&p), x, y + 4.9));
        assert!(!view.is_inside(MarkerRef::Place(&p), x, y + 5.1));
    }

    #[test]
    fn test_stale_ids_are_ignored() {
        let mut layers = layers();
        let mut ctl = SelectionController::new();
        ctl.pointer_clicked(60.0, 0.0, &mut layers, &DegreeHit);
        assert_eq!(ctl.pinned(), Some(MarkerId::Place(1)));

        // Host swapped in smaller layers
        let mut small = MarkerLayers::new(vec![hazard(0.0, 0.0, 5.0, None)], vec![]);
        ctl.pointer_clicked(0.0, 0.0, &mut small, &DegreeHit);
        assert_eq!(ctl.pinned(), Some(MarkerId::Hazard(0)));
        assert!(small.hazards[0].view.pinned);
    }
}
