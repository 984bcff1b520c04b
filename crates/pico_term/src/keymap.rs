//! Key-to-escape-sequence encoding.
//!
//! When a key event carries composed text (an ordinary typed character) the
//! bytes go to the child untouched. Symbolic keys (arrows, function keys,
//! the keypad) have no character of their own and are translated through a
//! rule table instead. Each rule constrains the modifier set and, with a
//! tri-state each, the APPLICATION_KEYPAD / APPLICATION_CURSOR mode bits and
//! NumLock; rules are tried in order and the first full match wins.
//!
//! The escape sequences follow the xterm conventions: modified arrows are
//! `ESC [ 1 ; N A..D` with N in 2..8, unmodified arrows switch between
//! `ESC [ A` and `ESC O A` forms on the cursor-key mode bit, F13 and up
//! alias the Shift/Control variants of F1..F12.

use bitflags::bitflags;
use pico_engine::Modes;

/// A symbolic key. Printable characters never reach the rule table; they are
/// forwarded as composed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    /// Page Up
    Prior,
    /// Page Down
    Next,
    Insert,
    Delete,
    BackSpace,
    Return,
    Tab,
    /// Shift-Tab on most layouts
    BackTab,
    /// Function keys 1..=35
    F(u8),
    KpHome,
    KpUp,
    KpDown,
    KpLeft,
    KpRight,
    KpPrior,
    KpBegin,
    KpEnd,
    KpNext,
    KpInsert,
    KpDelete,
    KpMultiply,
    KpAdd,
    KpEnter,
    KpSubtract,
    KpDecimal,
    KpDivide,
    /// Keypad digits 0..=9
    KpDigit(u8),
}

bitflags! {
    /// X11-style modifier state delivered with a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u16 {
        const SHIFT     = 1 << 0;
        const CAPS_LOCK = 1 << 1;
        const CONTROL   = 1 << 2;
        /// Alt on common layouts
        const MOD1      = 1 << 3;
        /// NumLock on common layouts
        const MOD2      = 1 << 4;
        const MOD3      = 1 << 5;
        const MOD4      = 1 << 6;
        const MOD5      = 1 << 7;
        /// Keyboard group switch
        const GROUP_SWITCH = 1 << 13 | 1 << 14;
    }
}

/// NumLock state and the group switch never disqualify a rule.
const IGNORED_MODIFIERS: Modifiers = Modifiers::MOD2.union(Modifiers::GROUP_SWITCH);

/// How a rule constrains the event's modifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModMatch {
    /// Any modifier combination
    Any,
    /// Exactly this set (after masking the ignored bits)
    Exactly(Modifiers),
}

/// Tri-state constraint on one mode bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeConstraint {
    Yes,
    No,
    Either,
}

impl ModeConstraint {
    fn matches(self, on: bool) -> bool {
        match self {
            ModeConstraint::Yes => on,
            ModeConstraint::No => !on,
            ModeConstraint::Either => true,
        }
    }
}

/// A keyboard event as delivered by the windowing collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The symbolic key, if the event maps to one.
    pub key: Option<Key>,
    pub modifiers: Modifiers,
    pub numlock: bool,
    /// Composed text for ordinary characters; takes precedence over `key`.
    pub text: Option<String>,
}

struct KeyRule {
    key: Key,
    mods: ModMatch,
    keypad: ModeConstraint,
    cursor: ModeConstraint,
    numlock: ModeConstraint,
    bytes: &'static [u8],
}

const fn with(key: Key, mods: Modifiers, keypad: ModeConstraint, cursor: ModeConstraint, numlock: ModeConstraint, bytes: &'static [u8]) -> KeyRule {
    KeyRule {
        key,
        mods: ModMatch::Exactly(mods),
        keypad,
        cursor,
        numlock,
        bytes,
    }
}

const fn any(key: Key, keypad: ModeConstraint, cursor: ModeConstraint, numlock: ModeConstraint, bytes: &'static [u8]) -> KeyRule {
    KeyRule {
        key,
        mods: ModMatch::Any,
        keypad,
        cursor,
        numlock,
        bytes,
    }
}

use ModeConstraint::{Either as E, No as N, Yes as Y};

const NONE: Modifiers = Modifiers::empty();
const S: Modifiers = Modifiers::SHIFT;
const C: Modifiers = Modifiers::CONTROL;
const A: Modifiers = Modifiers::MOD1;
const M3: Modifiers = Modifiers::MOD3;
const M4: Modifiers = Modifiers::MOD4;
const SA: Modifiers = S.union(A);
const SC: Modifiers = S.union(C);
const CA: Modifiers = C.union(A);
const SCA: Modifiers = SC.union(A);

#[rustfmt::skip]
static SPECIAL_KEYS: &[KeyRule] = &[
    //   key              mods  keypad  cursor  numlock
    with(Key::KpHome,     S,    E, N, E, b"\x1b[2J"),
    with(Key::KpHome,     S,    E, Y, E, b"\x1b[1;2H"),
    any( Key::KpHome,           E, N, E, b"\x1b[H"),
    any( Key::KpHome,           E, Y, E, b"\x1b[1~"),
    any( Key::KpUp,             Y, E, E, b"\x1bOx"),
    any( Key::KpUp,             E, N, E, b"\x1b[A"),
    any( Key::KpUp,             E, Y, E, b"\x1bOA"),
    any( Key::KpDown,           Y, E, E, b"\x1bOr"),
    any( Key::KpDown,           E, N, E, b"\x1b[B"),
    any( Key::KpDown,           E, Y, E, b"\x1bOB"),
    any( Key::KpLeft,           Y, E, E, b"\x1bOt"),
    any( Key::KpLeft,           E, N, E, b"\x1b[D"),
    any( Key::KpLeft,           E, Y, E, b"\x1bOD"),
    any( Key::KpRight,          Y, E, E, b"\x1bOv"),
    any( Key::KpRight,          E, N, E, b"\x1b[C"),
    any( Key::KpRight,          E, Y, E, b"\x1bOC"),
    with(Key::KpPrior,    S,    E, E, E, b"\x1b[5;2~"),
    any( Key::KpPrior,          E, E, E, b"\x1b[5~"),
    any( Key::KpBegin,          E, E, E, b"\x1b[E"),
    with(Key::KpEnd,      C,    N, E, E, b"\x1b[J"),
    with(Key::KpEnd,      C,    Y, E, E, b"\x1b[1;5F"),
    with(Key::KpEnd,      S,    N, E, E, b"\x1b[K"),
    with(Key::KpEnd,      S,    Y, E, E, b"\x1b[1;2F"),
    any( Key::KpEnd,            E, E, E, b"\x1b[4~"),
    with(Key::KpNext,     S,    E, E, E, b"\x1b[6;2~"),
    any( Key::KpNext,           E, E, E, b"\x1b[6~"),
    with(Key::KpInsert,   S,    Y, E, E, b"\x1b[2;2~"),
    with(Key::KpInsert,   S,    N, E, E, b"\x1b[4l"),
    with(Key::KpInsert,   C,    N, E, E, b"\x1b[L"),
    with(Key::KpInsert,   C,    Y, E, E, b"\x1b[2;5~"),
    any( Key::KpInsert,         N, E, E, b"\x1b[4h"),
    any( Key::KpInsert,         Y, E, E, b"\x1b[2~"),
    with(Key::KpDelete,   C,    N, E, E, b"\x1b[M"),
    with(Key::KpDelete,   C,    Y, E, E, b"\x1b[3;5~"),
    with(Key::KpDelete,   S,    N, E, E, b"\x1b[2K"),
    with(Key::KpDelete,   S,    Y, E, E, b"\x1b[3;2~"),
    any( Key::KpDelete,         N, E, E, b"\x1b[P"),
    any( Key::KpDelete,         Y, E, E, b"\x1b[3~"),
    any( Key::KpMultiply,       Y, E, Y, b"\x1bOj"),
    any( Key::KpAdd,            Y, E, Y, b"\x1bOk"),
    any( Key::KpEnter,          Y, E, Y, b"\x1bOM"),
    any( Key::KpEnter,          N, E, E, b"\r"),
    any( Key::KpSubtract,       Y, E, Y, b"\x1bOm"),
    any( Key::KpDecimal,        Y, E, Y, b"\x1bOn"),
    any( Key::KpDivide,         Y, E, Y, b"\x1bOo"),
    any( Key::KpDigit(0),       Y, E, Y, b"\x1bOp"),
    any( Key::KpDigit(1),       Y, E, Y, b"\x1bOq"),
    any( Key::KpDigit(2),       Y, E, Y, b"\x1bOr"),
    any( Key::KpDigit(3),       Y, E, Y, b"\x1bOs"),
    any( Key::KpDigit(4),       Y, E, Y, b"\x1bOt"),
    any( Key::KpDigit(5),       Y, E, Y, b"\x1bOu"),
    any( Key::KpDigit(6),       Y, E, Y, b"\x1bOv"),
    any( Key::KpDigit(7),       Y, E, Y, b"\x1bOw"),
    any( Key::KpDigit(8),       Y, E, Y, b"\x1bOx"),
    any( Key::KpDigit(9),       Y, E, Y, b"\x1bOy"),
    with(Key::Up,         S,    E, E, E, b"\x1b[1;2A"),
    with(Key::Up,         A,    E, E, E, b"\x1b[1;3A"),
    with(Key::Up,         SA,   E, E, E, b"\x1b[1;4A"),
    with(Key::Up,         C,    E, E, E, b"\x1b[1;5A"),
    with(Key::Up,         SC,   E, E, E, b"\x1b[1;6A"),
    with(Key::Up,         CA,   E, E, E, b"\x1b[1;7A"),
    with(Key::Up,         SCA,  E, E, E, b"\x1b[1;8A"),
    any( Key::Up,               E, N, E, b"\x1b[A"),
    any( Key::Up,               E, Y, E, b"\x1bOA"),
    with(Key::Down,       S,    E, E, E, b"\x1b[1;2B"),
    with(Key::Down,       A,    E, E, E, b"\x1b[1;3B"),
    with(Key::Down,       SA,   E, E, E, b"\x1b[1;4B"),
    with(Key::Down,       C,    E, E, E, b"\x1b[1;5B"),
    with(Key::Down,       SC,   E, E, E, b"\x1b[1;6B"),
    with(Key::Down,       CA,   E, E, E, b"\x1b[1;7B"),
    with(Key::Down,       SCA,  E, E, E, b"\x1b[1;8B"),
    any( Key::Down,             E, N, E, b"\x1b[B"),
    any( Key::Down,             E, Y, E, b"\x1bOB"),
    with(Key::Left,       S,    E, E, E, b"\x1b[1;2D"),
    with(Key::Left,       A,    E, E, E, b"\x1b[1;3D"),
    with(Key::Left,       SA,   E, E, E, b"\x1b[1;4D"),
    with(Key::Left,       C,    E, E, E, b"\x1b[1;5D"),
    with(Key::Left,       SC,   E, E, E, b"\x1b[1;6D"),
    with(Key::Left,       CA,   E, E, E, b"\x1b[1;7D"),
    with(Key::Left,       SCA,  E, E, E, b"\x1b[1;8D"),
    any( Key::Left,             E, N, E, b"\x1b[D"),
    any( Key::Left,             E, Y, E, b"\x1bOD"),
    with(Key::Right,      S,    E, E, E, b"\x1b[1;2C"),
    with(Key::Right,      A,    E, E, E, b"\x1b[1;3C"),
    with(Key::Right,      SA,   E, E, E, b"\x1b[1;4C"),
    with(Key::Right,      C,    E, E, E, b"\x1b[1;5C"),
    with(Key::Right,      SC,   E, E, E, b"\x1b[1;6C"),
    with(Key::Right,      CA,   E, E, E, b"\x1b[1;7C"),
    with(Key::Right,      SCA,  E, E, E, b"\x1b[1;8C"),
    any( Key::Right,            E, N, E, b"\x1b[C"),
    any( Key::Right,            E, Y, E, b"\x1bOC"),
    with(Key::BackTab,    S,    E, E, E, b"\x1b[Z"),
    with(Key::Return,     A,    E, E, E, b"\x1b\r"),
    any( Key::Return,           E, E, E, b"\r"),
    with(Key::Insert,     S,    N, E, E, b"\x1b[4l"),
    with(Key::Insert,     S,    Y, E, E, b"\x1b[2;2~"),
    with(Key::Insert,     C,    N, E, E, b"\x1b[L"),
    with(Key::Insert,     C,    Y, E, E, b"\x1b[2;5~"),
    any( Key::Insert,           N, E, E, b"\x1b[4h"),
    any( Key::Insert,           Y, E, E, b"\x1b[2~"),
    with(Key::Delete,     C,    N, E, E, b"\x1b[M"),
    with(Key::Delete,     C,    Y, E, E, b"\x1b[3;5~"),
    with(Key::Delete,     S,    N, E, E, b"\x1b[2K"),
    with(Key::Delete,     S,    Y, E, E, b"\x1b[3;2~"),
    any( Key::Delete,           N, E, E, b"\x1b[P"),
    any( Key::Delete,           Y, E, E, b"\x1b[3~"),
    with(Key::BackSpace,  NONE, E, E, E, b"\x7f"),
    with(Key::BackSpace,  A,    E, E, E, b"\x1b\x7f"),
    with(Key::Home,       S,    E, N, E, b"\x1b[2J"),
    with(Key::Home,       S,    E, Y, E, b"\x1b[1;2H"),
    any( Key::Home,             E, N, E, b"\x1b[H"),
    any( Key::Home,             E, Y, E, b"\x1b[1~"),
    with(Key::End,        C,    N, E, E, b"\x1b[J"),
    with(Key::End,        C,    Y, E, E, b"\x1b[1;5F"),
    with(Key::End,        S,    N, E, E, b"\x1b[K"),
    with(Key::End,        S,    Y, E, E, b"\x1b[1;2F"),
    any( Key::End,              E, E, E, b"\x1b[4~"),
    with(Key::Prior,      C,    E, E, E, b"\x1b[5;5~"),
    with(Key::Prior,      S,    E, E, E, b"\x1b[5;2~"),
    any( Key::Prior,            E, E, E, b"\x1b[5~"),
    with(Key::Next,       C,    E, E, E, b"\x1b[6;5~"),
    with(Key::Next,       S,    E, E, E, b"\x1b[6;2~"),
    any( Key::Next,             E, E, E, b"\x1b[6~"),
    with(Key::F(1),       NONE, E, E, E, b"\x1bOP"),
    with(Key::F(1),       S,    E, E, E, b"\x1b[1;2P"),
    with(Key::F(1),       C,    E, E, E, b"\x1b[1;5P"),
    with(Key::F(1),       M4,   E, E, E, b"\x1b[1;6P"),
    with(Key::F(1),       A,    E, E, E, b"\x1b[1;3P"),
    with(Key::F(1),       M3,   E, E, E, b"\x1b[1;4P"),
    with(Key::F(2),       NONE, E, E, E, b"\x1bOQ"),
    with(Key::F(2),       S,    E, E, E, b"\x1b[1;2Q"),
    with(Key::F(2),       C,    E, E, E, b"\x1b[1;5Q"),
    with(Key::F(2),       M4,   E, E, E, b"\x1b[1;6Q"),
    with(Key::F(2),       A,    E, E, E, b"\x1b[1;3Q"),
    with(Key::F(2),       M3,   E, E, E, b"\x1b[1;4Q"),
    with(Key::F(3),       NONE, E, E, E, b"\x1bOR"),
    with(Key::F(3),       S,    E, E, E, b"\x1b[1;2R"),
    with(Key::F(3),       C,    E, E, E, b"\x1b[1;5R"),
    with(Key::F(3),       M4,   E, E, E, b"\x1b[1;6R"),
    with(Key::F(3),       A,    E, E, E, b"\x1b[1;3R"),
    with(Key::F(3),       M3,   E, E, E, b"\x1b[1;4R"),
    with(Key::F(4),       NONE, E, E, E, b"\x1bOS"),
    with(Key::F(4),       S,    E, E, E, b"\x1b[1;2S"),
    with(Key::F(4),       C,    E, E, E, b"\x1b[1;5S"),
    with(Key::F(4),       M4,   E, E, E, b"\x1b[1;6S"),
    with(Key::F(4),       A,    E, E, E, b"\x1b[1;3S"),
    with(Key::F(5),       NONE, E, E, E, b"\x1b[15~"),
    with(Key::F(5),       S,    E, E, E, b"\x1b[15;2~"),
    with(Key::F(5),       C,    E, E, E, b"\x1b[15;5~"),
    with(Key::F(5),       M4,   E, E, E, b"\x1b[15;6~"),
    with(Key::F(5),       A,    E, E, E, b"\x1b[15;3~"),
    with(Key::F(6),       NONE, E, E, E, b"\x1b[17~"),
    with(Key::F(6),       S,    E, E, E, b"\x1b[17;2~"),
    with(Key::F(6),       C,    E, E, E, b"\x1b[17;5~"),
    with(Key::F(6),       M4,   E, E, E, b"\x1b[17;6~"),
    with(Key::F(6),       A,    E, E, E, b"\x1b[17;3~"),
    with(Key::F(7),       NONE, E, E, E, b"\x1b[18~"),
    with(Key::F(7),       S,    E, E, E, b"\x1b[18;2~"),
    with(Key::F(7),       C,    E, E, E, b"\x1b[18;5~"),
    with(Key::F(7),       M4,   E, E, E, b"\x1b[18;6~"),
    with(Key::F(7),       A,    E, E, E, b"\x1b[18;3~"),
    with(Key::F(8),       NONE, E, E, E, b"\x1b[19~"),
    with(Key::F(8),       S,    E, E, E, b"\x1b[19;2~"),
    with(Key::F(8),       C,    E, E, E, b"\x1b[19;5~"),
    with(Key::F(8),       M4,   E, E, E, b"\x1b[19;6~"),
    with(Key::F(8),       A,    E, E, E, b"\x1b[19;3~"),
    with(Key::F(9),       NONE, E, E, E, b"\x1b[20~"),
    with(Key::F(9),       S,    E, E, E, b"\x1b[20;2~"),
    with(Key::F(9),       C,    E, E, E, b"\x1b[20;5~"),
    with(Key::F(9),       M4,   E, E, E, b"\x1b[20;6~"),
    with(Key::F(9),       A,    E, E, E, b"\x1b[20;3~"),
    with(Key::F(10),      NONE, E, E, E, b"\x1b[21~"),
    with(Key::F(10),      S,    E, E, E, b"\x1b[21;2~"),
    with(Key::F(10),      C,    E, E, E, b"\x1b[21;5~"),
    with(Key::F(10),      M4,   E, E, E, b"\x1b[21;6~"),
    with(Key::F(10),      A,    E, E, E, b"\x1b[21;3~"),
    with(Key::F(11),      NONE, E, E, E, b"\x1b[23~"),
    with(Key::F(11),      S,    E, E, E, b"\x1b[23;2~"),
    with(Key::F(11),      C,    E, E, E, b"\x1b[23;5~"),
    with(Key::F(11),      M4,   E, E, E, b"\x1b[23;6~"),
    with(Key::F(11),      A,    E, E, E, b"\x1b[23;3~"),
    with(Key::F(12),      NONE, E, E, E, b"\x1b[24~"),
    with(Key::F(12),      S,    E, E, E, b"\x1b[24;2~"),
    with(Key::F(12),      C,    E, E, E, b"\x1b[24;5~"),
    with(Key::F(12),      M4,   E, E, E, b"\x1b[24;6~"),
    with(Key::F(12),      A,    E, E, E, b"\x1b[24;3~"),
    with(Key::F(13),      NONE, E, E, E, b"\x1b[1;2P"),
    with(Key::F(14),      NONE, E, E, E, b"\x1b[1;2Q"),
    with(Key::F(15),      NONE, E, E, E, b"\x1b[1;2R"),
    with(Key::F(16),      NONE, E, E, E, b"\x1b[1;2S"),
    with(Key::F(17),      NONE, E, E, E, b"\x1b[15;2~"),
    with(Key::F(18),      NONE, E, E, E, b"\x1b[17;2~"),
    with(Key::F(19),      NONE, E, E, E, b"\x1b[18;2~"),
    with(Key::F(20),      NONE, E, E, E, b"\x1b[19;2~"),
    with(Key::F(21),      NONE, E, E, E, b"\x1b[20;2~"),
    with(Key::F(22),      NONE, E, E, E, b"\x1b[21;2~"),
    with(Key::F(23),      NONE, E, E, E, b"\x1b[23;2~"),
    with(Key::F(24),      NONE, E, E, E, b"\x1b[24;2~"),
    with(Key::F(25),      NONE, E, E, E, b"\x1b[1;5P"),
    with(Key::F(26),      NONE, E, E, E, b"\x1b[1;5Q"),
    with(Key::F(27),      NONE, E, E, E, b"\x1b[1;5R"),
    with(Key::F(28),      NONE, E, E, E, b"\x1b[1;5S"),
    with(Key::F(29),      NONE, E, E, E, b"\x1b[15;5~"),
    with(Key::F(30),      NONE, E, E, E, b"\x1b[17;5~"),
    with(Key::F(31),      NONE, E, E, E, b"\x1b[18;5~"),
    with(Key::F(32),      NONE, E, E, E, b"\x1b[19;5~"),
    with(Key::F(33),      NONE, E, E, E, b"\x1b[20;5~"),
    with(Key::F(34),      NONE, E, E, E, b"\x1b[21;5~"),
    with(Key::F(35),      NONE, E, E, E, b"\x1b[23;5~"),
];

/// The byte sequence a symbolic key sends to the child, given the current
/// modifier state and terminal modes. Rules are evaluated in table order;
/// returns nothing when no rule matches.
pub fn lookup_key(key: Key, modifiers: Modifiers, numlock: bool, modes: Modes) -> Option<&'static [u8]> {
    let significant = modifiers.difference(IGNORED_MODIFIERS);
    let app_keypad = modes.contains(Modes::APP_KEYPAD);
    let app_cursor = modes.contains(Modes::APP_CURSOR);

    for rule in SPECIAL_KEYS {
        if rule.key != key {
            continue;
        }
        match rule.mods {
            ModMatch::Any => {}
            ModMatch::Exactly(mods) if mods == significant => {}
            ModMatch::Exactly(_) => continue,
        }
        if !rule.keypad.matches(app_keypad) || !rule.cursor.matches(app_cursor) || !rule.numlock.matches(numlock) {
            continue;
        }
        return Some(rule.bytes);
    }

    None
}
