//! Card composition: the legacy module-driven composer and the options-driven extended composer.

pub(crate) mod composer;
pub(crate) mod hydrate;
pub(crate) mod legacy;
pub(crate) mod options;
pub(crate) mod snap;
pub(crate) mod static_card;
