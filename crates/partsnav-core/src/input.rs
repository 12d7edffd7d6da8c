#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    Tab,
    Char(char),
    /// Ctrl+C.
    Interrupt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize { width: u16, height: u16 },
}

impl Key {
    pub fn is_quit(self) -> bool {
        matches!(self, Key::Char('q') | Key::Interrupt)
    }

    pub fn is_back(self) -> bool {
        self == Key::Esc
    }

    pub fn is_search(self) -> bool {
        self == Key::Char('/')
    }

    pub fn is_up(self) -> bool {
        matches!(self, Key::Up | Key::Char('k'))
    }

    pub fn is_down(self) -> bool {
        matches!(self, Key::Down | Key::Char('j'))
    }

    pub fn is_enter(self) -> bool {
        self == Key::Enter
    }

    pub fn is_bookmark(self) -> bool {
        self == Key::Char('b')
    }
}
