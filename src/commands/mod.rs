/// Full rebuild of the manifest from the campaigns directory.
pub mod update;
