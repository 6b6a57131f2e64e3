pub mod command;
pub mod provisioner;
