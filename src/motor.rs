//! Manual drive control.
//!
//! HTTP handlers store the latest [`ControlData`] in a shared
//! [`MotionControl`]; the motor task turns it into a duty cycle per motor.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Ticker};

/// Lowest duty cycle that still turns a motor (8 bit)
pub const MOTOR_MIN_DUTY: u8 = 70;
/// Highest duty cycle used (8 bit)
pub const MOTOR_MAX_DUTY: u8 = 230;

pub const DEFAULT_CONTROL_INTERVAL: Duration = Duration::from_millis(20);

/// Strafe threshold on the X axis
const X_THRESHOLD: i16 = 70;
/// Dead zone on the Y axis
const Y_THRESHOLD: i16 = 2;
/// Full speed, percent
const MAX_SPEED: i16 = 100;

/// Joystick state sent by the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlData {
    pub x: i16,
    pub y: i16,
    pub l: i8,
    pub r: i8,
}

impl ControlData {
    /// Steering in both directions at once cancels out to no steering
    pub const fn new(x: i16, y: i16, l: i8, r: i8) -> Self {
        let (l, r) = if l > 0 && r > 0 { (0, 0) } else { (l, r) };
        Self { x, y, l, r }
    }

    /// Mix the axes into left and right motor speeds (percent).
    ///
    /// Strafing on X wins over driving on Y, which wins over turning in
    /// place. Anything else stops both motors. Axes beyond full speed are
    /// clamped to it.
    pub fn drive(&self) -> Drive {
        let x = self.x.clamp(-MAX_SPEED, MAX_SPEED);
        let y = self.y.clamp(-MAX_SPEED, MAX_SPEED);
        let l = i16::from(self.l);
        let r = i16::from(self.r);
        let turning_left = l > 0 && r == 0;
        let turning_right = r > 0 && l == 0;

        if x.abs() >= X_THRESHOLD {
            Drive::new(x, -x)
        } else if y.abs() >= Y_THRESHOLD {
            let speed = y;
            match (speed > 0, turning_left, turning_right) {
                (true, true, _) => Drive::new(speed - l, speed),
                (true, _, true) => Drive::new(speed, speed - r),
                (false, true, _) => Drive::new(speed, speed + l),
                (false, _, true) => Drive::new(speed + r, speed),
                _ => Drive::new(speed, speed),
            }
        } else if turning_left {
            Drive::new(0, l)
        } else if turning_right {
            Drive::new(r, 0)
        } else {
            Drive::STOP
        }
    }
}

/// Signed speed per motor, percent of full speed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Drive {
    pub left: i16,
    pub right: i16,
}

impl Drive {
    pub const STOP: Self = Self::new(0, 0);

    pub const fn new(left: i16, right: i16) -> Self {
        Self { left, right }
    }
}

/// Convert a speed percentage into a signed 8 bit duty cycle.
///
/// Speeds within one percent of zero stop the motor, everything else maps
/// linearly onto [`MOTOR_MIN_DUTY`]..=[`MOTOR_MAX_DUTY`].
pub fn speed_to_duty(speed: i16) -> i16 {
    let speed = speed.clamp(-100, 100);
    let min = i16::from(MOTOR_MIN_DUTY);
    match speed {
        -1..=1 => 0,
        s if s > 0 => s * 8 / 5 + min,
        s => s * 8 / 5 - min,
    }
}

/// Duty cycles of the two PWM channels driving one motor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotorDuty {
    pub cw: u8,
    pub ccw: u8,
}

impl MotorDuty {
    pub fn from_speed(speed: i16) -> Self {
        let duty = speed_to_duty(speed);
        let level = u8::try_from(duty.unsigned_abs()).unwrap_or(MOTOR_MAX_DUTY);
        if duty > 0 {
            Self { cw: level, ccw: 0 }
        } else {
            Self { cw: 0, ccw: level }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motor {
    Left,
    Right,
}

/// PWM outputs of the two motors
pub trait MotorOutput {
    type Error: core::fmt::Debug;

    fn set_duty(&mut self, motor: Motor, duty: MotorDuty) -> Result<(), Self::Error>;
}

/// Write a drive to both motors
pub fn apply_drive<M: MotorOutput>(output: &mut M, drive: Drive) -> Result<(), M::Error> {
    output.set_duty(Motor::Left, MotorDuty::from_speed(drive.left))?;
    output.set_duty(Motor::Right, MotorDuty::from_speed(drive.right))
}

/// Latest control data, shared between the HTTP handlers and the motor task
pub struct MotionControl {
    data: Mutex<CriticalSectionRawMutex, Cell<ControlData>>,
}

impl MotionControl {
    pub const fn new() -> Self {
        Self {
            data: Mutex::new(Cell::new(ControlData::new(0, 0, 0, 0))),
        }
    }

    pub fn set(&self, data: ControlData) {
        self.data.lock(|cell| cell.set(data));
    }

    pub fn get(&self) -> ControlData {
        self.data.lock(Cell::get)
    }

    pub fn stop(&self) {
        self.set(ControlData::default());
    }
}

impl Default for MotionControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the shared control data to the motors
pub struct MotorController<'a, M: MotorOutput> {
    output: M,
    control: &'a MotionControl,
}

impl<'a, M: MotorOutput> MotorController<'a, M> {
    pub const fn new(output: M, control: &'a MotionControl) -> Self {
        Self { output, control }
    }

    /// Apply the current control data once
    pub fn update(&mut self) -> Result<Drive, M::Error> {
        let drive = self.control.get().drive();
        apply_drive(&mut self.output, drive)?;
        Ok(drive)
    }

    /// Update the motors every `interval`, stops on the first output error
    pub async fn run(&mut self, interval: Duration) -> Result<(), M::Error> {
        let mut ticker = Ticker::every(interval);
        loop {
            self.update()?;
            ticker.next().await;
        }
    }

    /// Stop both motors and hand back the output
    pub fn shutdown(mut self) -> Result<M, M::Error> {
        apply_drive(&mut self.output, Drive::STOP)?;
        Ok(self.output)
    }
}
