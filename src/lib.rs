#![no_std]

#[macro_use]
mod log;

pub mod animation;
pub mod bounds;
pub mod color;
pub mod control;
pub mod engine;
pub mod frame_scheduler;
pub mod light;
pub mod motor;
pub mod network;
pub mod output;
pub mod storage;
pub mod system;

pub use animation::{Animation, AnimationSelector, ColorScheme};
pub use bounds::StepBounds;
pub use color::{Color, Rgb};
pub use control::{ControlCommand, ControlError};
pub use engine::AnimationEngine;
pub use frame_scheduler::FrameScheduler;
pub use light::LightElement;
pub use motor::{ControlData, MotionControl, MotorController, MotorOutput};
pub use network::{
    ConnectionStage, ConnectivitySupervisor, GatewayInfo, NetworkState, NetworkStatus,
    RadioDriver, RadioEvent, SupervisorConfig, WifiCredentials,
};
pub use output::{Frame, OutputDriver, SmartLedsOutput};
pub use storage::{KeyValueStore, Settings};
pub use system::SystemState;

pub use embassy_time::{Duration, Instant};

/// Number of lights on the status strip
pub const LED_COUNT: usize = 6;
