//! Motion commands supplied by the input collaborator once per step.

/// A commanded motion: drive `forward` cells, then turn by `turn` radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Control {
    /// Distance to travel along the current heading, in cells.
    pub forward: f64,
    /// Rotation applied after the translation, in radians.
    pub turn: f64,
}

impl Control {
    /// A control that does not move or rotate.
    pub const STILL: Control = Control {
        forward: 0.0,
        turn: 0.0,
    };

    /// Create a control from its components.
    pub const fn new(forward: f64, turn: f64) -> Self {
        Self { forward, turn }
    }

    /// Whether the control translates at all.
    ///
    /// Used to gate measurement updates: a pure rotation gives the sensor
    /// no new information about position.
    pub fn moves(&self) -> bool {
        self.forward != 0.0
    }
}

/// One input event from the command source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advance the simulation one step with this control.
    Drive(Control),
    /// Stop the driving loop.
    Halt,
}

impl Command {
    /// Shorthand for `Command::Drive(Control::new(forward, turn))`.
    pub const fn drive(forward: f64, turn: f64) -> Self {
        Command::Drive(Control::new(forward, turn))
    }

    /// The control carried by this command, or `None` for [`Command::Halt`].
    pub fn control(&self) -> Option<Control> {
        match self {
            Command::Drive(control) => Some(*control),
            Command::Halt => None,
        }
    }

    /// Whether this command ends the run.
    pub fn is_halt(&self) -> bool {
        matches!(self, Command::Halt)
    }
}

impl From<Control> for Command {
    fn from(control: Control) -> Self {
        Command::Drive(control)
    }
}
