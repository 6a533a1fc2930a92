//! Built-in animation programs.

use super::stages::{End, Init, Program, Source, Step, Target, levels, tinted};
use super::Animation;
use crate::bounds::StepBounds;
use crate::color::{Color, ERROR, WIFI};

const IDLE_MIN: u8 = 5;
const IDLE_MAX: u8 = 80;
const IDLE_SPEED: u8 = 4;

const WIFI_MIN: u8 = 0;
const WIFI_MAX: u8 = 80;
const WIFI_CONNECTING_SPEED: u8 = 12;
const WIFI_CONNECTED_SPEED: u8 = 16;
const WIFI_DISCONNECTED_SPEED: u8 = 35;

const DEBUG_BRIGHTNESS: u8 = 100;

const LO: u8 = WIFI_MIN;
const HI: u8 = WIFI_MAX;

static IDLE: Program = Program {
    speed: IDLE_SPEED,
    bounds: StepBounds::brightness(IDLE_MIN, IDLE_MAX),
    init: [Init::new(Source::Theme, IDLE_MIN, IDLE_MAX); 6],
    steps: &[levels([IDLE_MIN; 6]), levels([IDLE_MAX; 6])],
    end: End::Repeat(1),
};

const fn breathe_with_debug(level: u8) -> Step {
    let mut step = levels([level; 6]);
    step[5] = Target::Snap(Source::Debug);
    step
}

static IDLE_DEBUG: Program = Program {
    speed: IDLE_SPEED,
    bounds: StepBounds::brightness(IDLE_MIN, IDLE_MAX),
    init: [
        Init::new(Source::Theme, IDLE_MIN, IDLE_MAX),
        Init::new(Source::Theme, IDLE_MIN, IDLE_MAX),
        Init::new(Source::Theme, IDLE_MIN, IDLE_MAX),
        Init::new(Source::Theme, IDLE_MIN, IDLE_MAX),
        Init::new(Source::Theme, IDLE_MIN, IDLE_MAX),
        Init::new(Source::Debug, DEBUG_BRIGHTNESS, DEBUG_BRIGHTNESS),
    ],
    steps: &[breathe_with_debug(IDLE_MIN), breathe_with_debug(IDLE_MAX)],
    end: End::Repeat(1),
};

/// Outer lights lit, chase starts from both ends
const WIFI_INIT: [Init; 6] = [
    Init::new(Source::Fixed(WIFI), LO, HI),
    Init::new(Source::Fixed(WIFI), LO, LO),
    Init::new(Source::Fixed(WIFI), LO, LO),
    Init::new(Source::Fixed(WIFI), LO, LO),
    Init::new(Source::Fixed(WIFI), LO, LO),
    Init::new(Source::Fixed(WIFI), LO, HI),
];

static WIFI_CONNECTING: Program = Program {
    speed: WIFI_CONNECTING_SPEED,
    bounds: StepBounds::brightness(WIFI_MIN, WIFI_MAX),
    init: WIFI_INIT,
    steps: &[
        levels([LO, HI, LO, LO, HI, LO]),
        levels([LO, LO, HI, HI, LO, LO]),
        [
            Target::Keep,
            Target::Brightness(HI),
            Target::Brightness(LO),
            Target::Brightness(LO),
            Target::Brightness(HI),
            Target::Brightness(LO),
        ],
        levels([HI, LO, LO, LO, LO, HI]),
    ],
    end: End::Repeat(1),
};

const SKY: Color = Color::rgb(10, 150, 200);
const TEAL: Color = Color::rgb(10, 175, 175);
const SEA: Color = Color::rgb(10, 200, 150);
const JADE: Color = Color::rgb(10, 225, 125);
const MINT: Color = Color::rgb(10, 250, 100);

static WIFI_CONNECTED: Program = Program {
    speed: WIFI_CONNECTED_SPEED,
    bounds: StepBounds::brightness(WIFI_MIN, WIFI_MAX),
    init: WIFI_INIT,
    steps: &[
        tinted(SKY, [LO, HI, LO, LO, HI, LO]),
        tinted(TEAL, [LO, LO, HI, HI, LO, LO]),
        tinted(SEA, [HI, LO, LO, LO, LO, HI]),
        tinted(JADE, [LO, HI, LO, LO, HI, LO]),
        tinted(MINT, [LO, LO, HI, HI, LO, LO]),
        tinted(MINT, [HI; 6]),
        tinted(MINT, [LO; 6]),
    ],
    end: End::Switch(Animation::Idle),
};

static WIFI_DISCONNECTED: Program = Program {
    speed: WIFI_DISCONNECTED_SPEED,
    bounds: StepBounds::brightness(WIFI_MIN, WIFI_MAX),
    init: [
        Init::new(Source::Fixed(ERROR), LO, HI),
        Init::new(Source::Fixed(ERROR), LO, LO),
        Init::new(Source::Fixed(ERROR), LO, LO),
        Init::new(Source::Fixed(ERROR), LO, LO),
        Init::new(Source::Fixed(ERROR), LO, LO),
        Init::new(Source::Fixed(ERROR), LO, LO),
    ],
    steps: &[
        levels([LO, HI, LO, LO, LO, LO]),
        levels([LO, LO, HI, LO, LO, LO]),
        levels([LO, LO, LO, HI, LO, LO]),
        levels([LO, LO, LO, LO, HI, LO]),
        levels([LO, LO, LO, LO, LO, HI]),
        levels([LO; 6]),
        levels([LO, LO, LO, LO, LO, HI]),
        levels([LO, LO, LO, LO, HI, HI]),
        levels([LO, LO, LO, HI, HI, HI]),
        levels([LO, LO, HI, HI, HI, HI]),
        levels([LO, HI, HI, HI, HI, HI]),
        levels([HI; 6]),
        levels([LO; 6]),
    ],
    end: End::Switch(Animation::None),
};

/// Program played for `animation`.
///
/// [`Animation::None`] has no program; the engine turns the lights off
/// when it is selected.
pub fn program(animation: Animation) -> Option<&'static Program> {
    match animation {
        Animation::None => None,
        Animation::Idle => Some(&IDLE),
        Animation::IdleDebug => Some(&IDLE_DEBUG),
        Animation::WifiConnecting => Some(&WIFI_CONNECTING),
        Animation::WifiConnected => Some(&WIFI_CONNECTED),
        Animation::WifiDisconnected => Some(&WIFI_DISCONNECTED),
    }
}
