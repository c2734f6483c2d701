//! Navball: a textured attitude sphere with reticle, level line and
//! Sun/Moon indicators.
//!
//! ## Frame pipeline
//!
//! 1. Build the platform rotation from azimuth, elevation and bank.
//! 2. For every pixel inside the disc, rotate its LUT normal and sample the
//!    skin texture at the resulting equirectangular coordinates.
//! 3. Shade with a fixed ambient + diffuse term using the unrotated normal,
//!    so the highlight stays put while the sphere turns under it.
//! 4. Overlay the reticle, the level line, then the celestial indicators.
//!
//! A navball whose skin or LUT cannot be built stays disabled for its
//! lifetime and every render returns `false`.

pub mod lut;
pub mod rotation;

use nalgebra::Vector3;
use tracing::{error, info, warn};

use celestial::{is_visible, Body, CelestialPositions};
use osd_common::{CelestialIndicatorsConfig, Color, NavballConfig, ResourcePaths, TelemetrySnapshot};

use crate::framebuffer::Framebuffer;
use crate::icon::{Icon, IconRenderer, SvgIcon};
use crate::primitives::{draw_circle_outline, draw_filled_circle};
use crate::texture::Texture;

pub use lut::SphereLut;
pub use rotation::{orientation_rotation, platform_rotation, sphere_to_uv, to_view};

/// Indicator diameter as a fraction of the sphere diameter.
const INDICATOR_SIZE_FACTOR: f32 = 0.52;
const BACK_SIZE_FACTOR: f32 = 0.7;
const BACK_ALPHA: f32 = 0.5;

const AMBIENT: f32 = 0.4;
const DIFFUSE: f32 = 0.6;

fn light_direction() -> Vector3<f32> {
    Vector3::new(0.3, 0.3, 1.0).normalize()
}

/// Lighting factor for a sphere-frame normal.
#[inline]
pub fn shade(normal: &Vector3<f32>, light: &Vector3<f32>) -> f32 {
    AMBIENT + DIFFUSE * normal.dot(light).max(0.0)
}

/// Icons for one body on the near and far hemisphere.
#[derive(Debug)]
struct BodyIcons {
    front: Icon,
    back: Icon,
}

impl BodyIcons {
    fn load(
        resources: &ResourcePaths,
        front: Option<&String>,
        back: Option<&String>,
        fallback: Color,
    ) -> Self {
        let load = |path: Option<&String>| {
            let resolved = path.map(|p| resources.resolve(p));
            Icon::load_or_disc(resolved.as_deref(), fallback)
        };
        Self {
            front: load(front),
            back: load(back),
        }
    }

    fn discs(color: Color) -> Self {
        Self {
            front: Icon::load_or_disc(None, color),
            back: Icon::load_or_disc(None, color),
        }
    }

    fn pick(&mut self, front: bool) -> &mut Icon {
        if front {
            &mut self.front
        } else {
            &mut self.back
        }
    }
}

/// Everything a ready navball owns.
#[derive(Debug)]
struct NavballAssets {
    lut: SphereLut,
    texture: Texture,
    reticle: Option<SvgIcon>,
    sun: BodyIcons,
    moon: BodyIcons,
}

#[derive(Debug)]
pub struct Navball {
    config: NavballConfig,
    celestial: CelestialIndicatorsConfig,
    assets: Option<NavballAssets>,
    light: Vector3<f32>,
}

impl Navball {
    /// Load the skin and icons from `resources`.
    ///
    /// Failure to load the skin or build the LUT leaves the widget disabled.
    /// Missing icons fall back to primitives.
    pub fn new(
        config: &NavballConfig,
        celestial: &CelestialIndicatorsConfig,
        resources: &ResourcePaths,
    ) -> Self {
        let mut navball = Self::disabled(config, celestial);
        if !config.enabled {
            info!("Navball disabled in config");
            return navball;
        }

        let skin_path = resources.navball_skin(config.skin);
        let texture = match Texture::from_file(&skin_path) {
            Ok(t) => t,
            Err(e) => {
                error!(error = %e, skin = ?config.skin, "Navball skin failed to load, widget disabled");
                return navball;
            }
        };

        let reticle = config.center_indicator_svg.as_ref().and_then(|path| {
            SvgIcon::from_file(resources.resolve(path))
                .map_err(|e| warn!(error = %e, "Reticle icon unavailable, using primitive reticle"))
                .ok()
        });

        let sun = BodyIcons::load(
            resources,
            celestial.sun_front_svg.as_ref().or(celestial.sun_svg.as_ref()),
            celestial.sun_back_svg.as_ref().or(celestial.sun_svg.as_ref()),
            celestial.sun_color,
        );
        let moon = BodyIcons::load(
            resources,
            celestial.moon_front_svg.as_ref().or(celestial.moon_svg.as_ref()),
            celestial.moon_back_svg.as_ref().or(celestial.moon_svg.as_ref()),
            celestial.moon_color,
        );

        navball.install(texture, reticle, sun, moon);
        navball
    }

    /// Build around an in-memory texture, with primitive reticle and discs.
    pub fn with_texture(
        config: &NavballConfig,
        celestial: &CelestialIndicatorsConfig,
        texture: Texture,
    ) -> Self {
        let mut navball = Self::disabled(config, celestial);
        if config.enabled {
            navball.install(
                texture,
                None,
                BodyIcons::discs(celestial.sun_color),
                BodyIcons::discs(celestial.moon_color),
            );
        }
        navball
    }

    fn disabled(config: &NavballConfig, celestial: &CelestialIndicatorsConfig) -> Self {
        Self {
            config: config.clone(),
            celestial: celestial.clone(),
            assets: None,
            light: light_direction(),
        }
    }

    fn install(&mut self, texture: Texture, reticle: Option<SvgIcon>, sun: BodyIcons, moon: BodyIcons) {
        match SphereLut::new(self.config.size) {
            Ok(lut) => {
                info!(
                    size = self.config.size,
                    x = self.config.position_x,
                    y = self.config.position_y,
                    skin = ?self.config.skin,
                    "Navball ready"
                );
                self.assets = Some(NavballAssets {
                    lut,
                    texture,
                    reticle,
                    sun,
                    moon,
                });
            }
            Err(e) => error!(error = %e, "Navball LUT unavailable, widget disabled"),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.assets.is_some()
    }

    /// Screen-space center and radius of the sphere.
    pub fn geometry(&self) -> (i32, i32, i32) {
        let size = self.config.size as i32;
        (
            self.config.position_x + size / 2,
            self.config.position_y + size / 2,
            size / 2,
        )
    }

    /// Draw one frame. Returns `true` when anything was drawn.
    pub fn render(
        &mut self,
        fb: &mut Framebuffer,
        snapshot: &TelemetrySnapshot,
        positions: Option<&CelestialPositions>,
    ) -> bool {
        let light = self.light;
        let (cx, cy, radius) = self.geometry();
        let Some(assets) = self.assets.as_mut() else {
            return false;
        };
        let config = &self.config;
        let rotation = orientation_rotation(snapshot.orientation.as_ref());

        for (x, y, normal) in assets.lut.iter_valid() {
            let rotated = rotation * normal;
            let (u, v) = sphere_to_uv(&rotated);
            let lit = assets.texture.sample(u, v).scale_rgb(shade(&normal, &light));
            fb.blend_pixel(config.position_x + x as i32, config.position_y + y as i32, lit);
        }

        if config.show_center_indicator {
            draw_reticle(fb, config, assets.reticle.as_mut());
        }

        if config.show_level_marker {
            draw_level_line(fb, config, &assets.lut);
        }

        if self.celestial.enabled {
            if let Some(positions) = positions {
                let indicator_size =
                    (config.size as f32 * INDICATOR_SIZE_FACTOR * self.celestial.scale) as i32;
                let bodies = [
                    (Body::Sun, self.celestial.show_sun, &mut assets.sun),
                    (Body::Moon, self.celestial.show_moon, &mut assets.moon),
                ];
                for (body, shown, icons) in bodies {
                    if !shown {
                        continue;
                    }
                    let Some(pos) = positions.get(body) else {
                        continue;
                    };
                    if !is_visible(pos.altitude, self.celestial.visibility_threshold as f64) {
                        continue;
                    }
                    let view = to_view(&rotation, &pos.to_vector().cast::<f32>());
                    let sx = cx + (view.x * radius as f32) as i32;
                    let sy = cy - (view.y * radius as f32) as i32;
                    let front = view.z > 0.0;
                    let (size, alpha) = if front {
                        (indicator_size, 1.0)
                    } else {
                        ((indicator_size as f32 * BACK_SIZE_FACTOR) as i32, BACK_ALPHA)
                    };
                    if size <= 0 {
                        continue;
                    }
                    icons.pick(front).draw(
                        fb,
                        sx - size / 2,
                        sy - size / 2,
                        size as u32,
                        size as u32,
                        alpha,
                    );
                }
            }
        }

        true
    }
}

/// Center reticle sized as a fraction of the sphere diameter.
fn draw_reticle(fb: &mut Framebuffer, config: &NavballConfig, svg: Option<&mut SvgIcon>) {
    let size = config.size as i32;
    let indicator = (config.size as f32 * config.center_indicator_scale) as i32;
    if indicator <= 0 {
        return;
    }
    let x = config.position_x + (size - indicator) / 2;
    let y = config.position_y + (size - indicator) / 2;

    match svg {
        Some(icon) => icon.draw(fb, x, y, indicator as u32, indicator as u32, 1.0),
        None => {
            let cx = x + indicator / 2;
            let cy = y + indicator / 2;
            let radius = indicator as f32 / 2.0 - 1.0;
            draw_circle_outline(fb, cx, cy, radius, Color::WHITE, 2.0);
            draw_filled_circle(fb, cx, cy, (indicator as f32 / 10.0).max(2.0), Color::WHITE);
        }
    }
}

/// Opaque white row through the equator, limited to the disc.
fn draw_level_line(fb: &mut Framebuffer, config: &NavballConfig, lut: &SphereLut) {
    let row = config.size / 2;
    let screen_y = config.position_y + row as i32;
    for x in 0..config.size {
        if lut.is_valid(x, row) {
            fb.blend_pixel(config.position_x + x as i32, screen_y, Color::WHITE);
        }
    }
}
