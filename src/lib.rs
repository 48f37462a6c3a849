//! `termscreen-core`: the core rendering and interaction engine of an
//! interactive terminal prompt toolkit.
//!
//! This crate owns four tightly coupled parts: a sparse styled [`screen`]
//! model, a differential [`renderer`] that turns two screen states into the
//! shortest safe sequence of terminal control operations, a fragment
//! [`processors`] pipeline with bidirectional position mapping, and a
//! [`mouse`] / VT100 key dispatch subsystem. Everything above those layers —
//! layout, widgets, completion, history, the PTY/stdin transport — is an
//! external collaborator; only the shapes this crate touches are modeled, in
//! [`collab`].
//!
//! Non-goals: no layout engine, no CSS, no widget library, no reactive
//! signals, no app/runtime framework, no PTY/stdin transport. See `DESIGN.md`
//! for the grounding ledger and Open Question resolutions.

#![warn(missing_docs)]

pub mod char_cell;
pub mod collab;
pub mod color;
pub mod diff;
pub mod error;
pub mod event;
pub mod fragment;
pub mod geometry;
pub mod interner;
pub mod mouse;
pub mod output;
pub mod processors;
pub mod renderer;
pub mod screen;
pub mod style;

pub use char_cell::{Char, CharacterDisplayMappings};
pub use collab::{Buffer, FocusRing, KeyProcessor, Layout, MouseHandlers};
pub use diff::ScreenDiff;
pub use error::{Handled, Result, ScreenError};
pub use event::{KeyPress, MouseEvent};
pub use fragment::{Fragment, FragmentList};
pub use geometry::{Position, Size, WritePosition};
pub use mouse::{load_default_bindings, MouseBinding};
pub use output::Output;
pub use processors::{merge_processors, Processor, TransformationInput};
pub use renderer::Renderer;
pub use screen::{Screen, WindowId};
pub use style::StyleString;
