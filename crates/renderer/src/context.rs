//! Frame orchestration: state intake, dirty tracking and widget order.

use tracing::{debug, info, warn};

use celestial::{calculate_positions, CelestialPositions, ObserverLocation};
use osd_common::{
    JsonTelemetryDecoder, OsdConfig, OsdResult, ResourcePaths, TelemetryDecoder, TelemetrySnapshot,
};

use crate::crosshair::Crosshair;
use crate::framebuffer::Framebuffer;
use crate::navball::Navball;
use crate::radar_compass::RadarCompass;
use crate::state_buffer::StateBuffer;
use crate::timestamp::Timestamp;

/// The widget set, drawn in field order.
#[derive(Debug)]
pub struct Widgets {
    pub crosshair: Crosshair,
    pub timestamp: Timestamp,
    pub navball: Navball,
    pub radar_compass: RadarCompass,
}

impl Widgets {
    /// Build every widget from config, loading assets under `resources`.
    pub fn load(config: &OsdConfig, resources: &ResourcePaths) -> Self {
        Self {
            crosshair: Crosshair::new(&config.crosshair, &config.speed_indicators, resources),
            timestamp: Timestamp::new(&config.timestamp, resources),
            navball: Navball::new(&config.navball, &config.celestial_indicators, resources),
            radar_compass: RadarCompass::new(
                &config.radar_compass,
                &config.celestial_indicators,
                config.stream,
                resources,
            ),
        }
    }
}

pub struct OsdContext {
    config: OsdConfig,
    framebuffer: Framebuffer,
    state: StateBuffer,
    needs_render: bool,
    decoder: Box<dyn TelemetryDecoder>,
    widgets: Widgets,
}

impl std::fmt::Debug for OsdContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsdContext")
            .field("width", &self.framebuffer.width())
            .field("height", &self.framebuffer.height())
            .field("needs_render", &self.needs_render)
            .field("widgets", &self.widgets)
            .finish()
    }
}

impl OsdContext {
    /// Validate `config`, allocate the framebuffer and load every widget.
    pub fn new(config: OsdConfig) -> OsdResult<Self> {
        let resources = ResourcePaths::new(&config.resource_root);
        Self::with_decoder(config, &resources, Box::new(JsonTelemetryDecoder))
    }

    pub fn with_decoder(
        config: OsdConfig,
        resources: &ResourcePaths,
        decoder: Box<dyn TelemetryDecoder>,
    ) -> OsdResult<Self> {
        config.validate()?;
        let widgets = Widgets::load(&config, resources);
        Self::from_widgets(config, decoder, widgets)
    }

    /// Assemble a context around widgets built elsewhere.
    pub fn from_widgets(
        config: OsdConfig,
        decoder: Box<dyn TelemetryDecoder>,
        widgets: Widgets,
    ) -> OsdResult<Self> {
        let framebuffer = Framebuffer::with_max_capacity(config.width, config.height)?;
        info!(
            width = config.width,
            height = config.height,
            stream = ?config.stream,
            navball = widgets.navball.is_enabled(),
            radar_compass = widgets.radar_compass.is_enabled(),
            timestamp = widgets.timestamp.is_enabled(),
            "OSD context initialized"
        );
        Ok(Self {
            config,
            framebuffer,
            state: StateBuffer::new(),
            // The crosshair is drawn before any telemetry arrives
            needs_render: true,
            decoder,
            widgets,
        })
    }

    pub fn config(&self) -> &OsdConfig {
        &self.config
    }

    /// Store a new raw payload and mark the next render as needed.
    ///
    /// An empty or oversized payload is rejected and leaves both the stored
    /// state and the dirty flag as they were.
    pub fn update_state(&mut self, payload: &[u8]) -> OsdResult<()> {
        self.state.store(payload)?;
        self.needs_render = true;
        Ok(())
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Render the stored state if it changed since the last pass.
    ///
    /// Without decodable telemetry the frame is drawn from an empty snapshot,
    /// which leaves the crosshair as the only widget with anything to show.
    /// Returns `true` when the framebuffer should be presented again.
    pub fn render(&mut self) -> bool {
        if !self.needs_render {
            return false;
        }
        self.framebuffer.clear();
        self.needs_render = false;

        let snapshot = if self.state.is_empty() {
            TelemetrySnapshot::default()
        } else {
            match self.decoder.decode(self.state.payload()) {
                Ok(s) => s,
                Err(e) => {
                    warn!(
                        error = %e,
                        bytes = self.state.payload().len(),
                        "Telemetry decode failed, drawing without telemetry"
                    );
                    TelemetrySnapshot::default()
                }
            }
        };

        self.render_snapshot(&snapshot)
    }

    /// Draw every widget for `snapshot` onto the framebuffer as it stands.
    pub fn render_snapshot(&mut self, snapshot: &TelemetrySnapshot) -> bool {
        let positions = self.celestial_positions(snapshot);
        let fb = &mut self.framebuffer;
        let w = &mut self.widgets;

        let mut changed = false;
        changed |= w.crosshair.render(fb, snapshot);
        changed |= w.timestamp.render(fb, snapshot);
        changed |= w.navball.render(fb, snapshot, positions.as_ref());
        changed |= w.radar_compass.render(fb, snapshot, positions.as_ref());
        changed
    }

    /// Sun and Moon for this frame, when anything will draw them.
    fn celestial_positions(&self, snapshot: &TelemetrySnapshot) -> Option<CelestialPositions> {
        if !self.config.celestial_indicators.enabled {
            return None;
        }
        if !self.widgets.navball.is_enabled() && !self.widgets.radar_compass.is_enabled() {
            return None;
        }
        let gps = snapshot.gps?;
        let Some(timestamp) = snapshot.observation_timestamp() else {
            debug!("No observation time, celestial indicators skipped");
            return None;
        };
        let observer = ObserverLocation::new(gps.latitude, gps.longitude, gps.altitude);
        Some(calculate_positions(timestamp, observer))
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn widgets(&self) -> &Widgets {
        &self.widgets
    }
}
