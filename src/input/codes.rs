//! Input codes
//!
//! Keys use DOM `KeyboardEvent.code` strings so browser events map directly.
//! Mouse buttons use `MouseEvent.button` indices.

pub type KeyCode = &'static str;
pub type MouseButton = i32;

pub const M_LBUTTON: MouseButton = 0;
pub const M_MBUTTON: MouseButton = 1;
pub const M_RBUTTON: MouseButton = 2;

pub const K_LEFT: KeyCode = "ArrowLeft";
pub const K_RIGHT: KeyCode = "ArrowRight";
pub const K_UP: KeyCode = "ArrowUp";
pub const K_DOWN: KeyCode = "ArrowDown";
pub const K_SPACE: KeyCode = "Space";
pub const K_RETURN: KeyCode = "Enter";
pub const K_ESCAPE: KeyCode = "Escape";
pub const K_TAB: KeyCode = "Tab";
pub const K_BACK: KeyCode = "Backspace";
pub const K_LSHIFT: KeyCode = "ShiftLeft";
pub const K_RSHIFT: KeyCode = "ShiftRight";
pub const K_LCONTROL: KeyCode = "ControlLeft";
pub const K_RCONTROL: KeyCode = "ControlRight";

pub const K_A: KeyCode = "KeyA";
pub const K_B: KeyCode = "KeyB";
pub const K_C: KeyCode = "KeyC";
pub const K_D: KeyCode = "KeyD";
pub const K_E: KeyCode = "KeyE";
pub const K_F: KeyCode = "KeyF";
pub const K_G: KeyCode = "KeyG";
pub const K_H: KeyCode = "KeyH";
pub const K_I: KeyCode = "KeyI";
pub const K_J: KeyCode = "KeyJ";
pub const K_K: KeyCode = "KeyK";
pub const K_L: KeyCode = "KeyL";
pub const K_M: KeyCode = "KeyM";
pub const K_N: KeyCode = "KeyN";
pub const K_O: KeyCode = "KeyO";
pub const K_P: KeyCode = "KeyP";
pub const K_Q: KeyCode = "KeyQ";
pub const K_R: KeyCode = "KeyR";
pub const K_S: KeyCode = "KeyS";
pub const K_T: KeyCode = "KeyT";
pub const K_U: KeyCode = "KeyU";
pub const K_V: KeyCode = "KeyV";
pub const K_W: KeyCode = "KeyW";
pub const K_X: KeyCode = "KeyX";
pub const K_Y: KeyCode = "KeyY";
pub const K_Z: KeyCode = "KeyZ";

pub const K_0: KeyCode = "Digit0";
pub const K_1: KeyCode = "Digit1";
pub const K_2: KeyCode = "Digit2";
pub const K_3: KeyCode = "Digit3";
pub const K_4: KeyCode = "Digit4";
pub const K_5: KeyCode = "Digit5";
pub const K_6: KeyCode = "Digit6";
pub const K_7: KeyCode = "Digit7";
pub const K_8: KeyCode = "Digit8";
pub const K_9: KeyCode = "Digit9";
