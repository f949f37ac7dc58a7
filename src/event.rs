#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

/// Discrete input delivered by the host in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Click over the raster, in data coordinates.
    Click { x: f64, y: f64, button: MouseButton },
    /// Click anywhere outside the raster.
    ClickOutside,
    /// Key press, identified by its lower-case name (`"enter"`, `"backspace"`, ...).
    Key(String),
}

impl InputEvent {
    pub fn key(name: &str) -> Self {
        Self::Key(name.to_lowercase())
    }
}
