use crate::LED_COUNT;
use crate::animation::{Animation, AnimationSelector, ColorScheme, End, Program, Target, program};
use crate::light::LightElement;
use crate::output::{Frame, OutputDriver, OutputError};

/// Animation engine - steps the lights and renders one frame per tick
pub struct AnimationEngine<'a, O: OutputDriver> {
    // External dependencies
    output: O,
    selector: &'a AnimationSelector,
    colors: &'a ColorScheme,

    // Internal state
    elements: [LightElement; LED_COUNT],
    last: Animation,
    stage: u8,
    speed: u8,
    frame: Frame,
    failed_frames: u32,
}

impl<'a, O: OutputDriver> AnimationEngine<'a, O> {
    /// Create the engine and blank the strip.
    ///
    /// A failing first write means the strip is unusable, so it is
    /// returned as an error instead of being tolerated like later ones.
    pub fn new(
        mut output: O,
        selector: &'a AnimationSelector,
        colors: &'a ColorScheme,
    ) -> Result<Self, OutputError<O::Error>> {
        let frame = Frame::blank();
        output.write(&frame).map_err(OutputError)?;
        Ok(Self {
            output,
            selector,
            colors,
            elements: [LightElement::new(); LED_COUNT],
            last: Animation::None,
            stage: 0,
            speed: 0,
            frame,
            failed_frames: 0,
        })
    }

    /// Process one frame
    ///
    /// Picks up selector changes, runs one stage step of the active program
    /// and writes the result to the output.
    pub fn tick(&mut self) -> &Frame {
        if self.selector.take_restart() {
            self.last = Animation::None;
        }

        let current = self.selector.get();
        let active = program(current);
        if current != self.last {
            debug!(
                "[AnimationEngine.tick] {} -> {}",
                self.last.as_str(),
                current.as_str()
            );
            self.last = current;
            self.stage = 0;
            match active {
                Some(program) => self.speed = program.speed,
                None => self.set_all_off(),
            }
        }

        if let Some(program) = active {
            self.run(program);
        }

        self.render();
        &self.frame
    }

    /// Animation the engine is currently playing
    pub const fn animation(&self) -> Animation {
        self.last
    }

    pub const fn stage(&self) -> u8 {
        self.stage
    }

    pub const fn speed(&self) -> u8 {
        self.speed
    }

    pub const fn elements(&self) -> &[LightElement; LED_COUNT] {
        &self.elements
    }

    /// Frames the output refused since start
    pub const fn failed_frames(&self) -> u32 {
        self.failed_frames
    }

    /// Stop the engine and hand back the output driver
    pub fn into_output(self) -> O {
        self.output
    }

    fn run(&mut self, program: &Program) {
        if self.stage == 0 {
            self.init(program);
            self.stage = 1;
            return;
        }

        if !self.advance_all(program) {
            return;
        }

        let index = usize::from(self.stage - 1);
        match program.steps.get(index) {
            Some(step) => {
                for (element, target) in self.elements.iter_mut().zip(step) {
                    apply(element, *target, self.colors);
                }
                self.stage += 1;
                if usize::from(self.stage) > program.steps.len() {
                    if let End::Repeat(stage) = program.end {
                        self.stage = stage;
                    }
                }
            }
            None => {
                if let End::Switch(next) = program.end {
                    // A request made since this tick read the selector wins
                    self.selector.replace(self.last, next);
                }
            }
        }
    }

    fn init(&mut self, program: &Program) {
        for (element, init) in self.elements.iter_mut().zip(&program.init) {
            let color = self.colors.resolve(init.source);
            element.set_current(color.with_brightness(init.from));
            element.set_target(color.with_brightness(init.to));
        }
    }

    /// Advance every element, `true` once all of them settled
    fn advance_all(&mut self, program: &Program) -> bool {
        let mut settled = true;
        for element in &mut self.elements {
            if !element.advance(self.speed, &program.bounds) {
                settled = false;
            }
        }
        settled
    }

    fn set_all_off(&mut self) {
        for element in &mut self.elements {
            element.set_off();
        }
    }

    fn render(&mut self) {
        for (pixel, element) in self.frame.pixels.iter_mut().zip(&self.elements) {
            *pixel = element.current().to_rgb();
        }
        if let Err(error) = self.output.write(&self.frame) {
            self.failed_frames = self.failed_frames.saturating_add(1);
            warn!("[AnimationEngine.render] frame dropped: {:?}", error);
        }
    }
}

fn apply(element: &mut LightElement, target: Target, colors: &ColorScheme) {
    match target {
        Target::Keep => {}
        Target::Brightness(brightness) => element.set_target_brightness(brightness),
        Target::Color(color) => element.set_target(color),
        Target::Snap(source) => element.set_color(colors.resolve(source)),
    }
}
