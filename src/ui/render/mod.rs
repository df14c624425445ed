mod all;
mod dashboard;
mod feedback;
mod footer;
mod landing;
mod log;
mod main;
mod mentor_profile;
mod mentors;
mod sessions;
mod sidebar;

use self::log::log;
use super::*;
use footer::footer;
use main::main;
use sidebar::sidebar;

pub use all::all as render;
