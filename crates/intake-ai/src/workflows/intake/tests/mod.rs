mod common;
mod localize;
mod submissions;
mod validation;
