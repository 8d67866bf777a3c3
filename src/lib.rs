/*
 * Neural Field - Module Definitions
 *
 * A full-window particle field: particles drift, bounce off the edges, are
 * pushed away by the pointer, and are joined by fading lines when close.
 */

// Re-export key components for easier access
pub use app::Model;
pub use config::{AppConfig, ConfigError};
pub use field::{pointer_sentinel, Edge, ParticleField, Viewport};
pub use host::{FrameHandle, Host, HostEvent, QueuedHost, Subscription};
pub use lifecycle::{LifecycleController, LifecycleState};
pub use params::{FieldParams, Timestep};
pub use particle::Particle;
pub use renderer::FrameStats;
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use theme::{Color, Palette, Theme};

// Define modules
pub mod app;
pub mod config;
pub mod debug;
pub mod field;
pub mod host;
pub mod input;
pub mod lifecycle;
pub mod params;
pub mod particle;
pub mod renderer;
pub mod surface;
pub mod theme;
pub mod ui;
