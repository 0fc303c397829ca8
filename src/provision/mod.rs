//! Environment provisioning.
//!
//! [`Provisioner::provision`] runs the install sequence:
//!
//! 1. Detect platform, package manager, runtime and installer
//! 2. Install system packages (advisory unless strict)
//! 3. Create the directory layout and write the install record
//! 4. Copy the source tree into the install directory
//! 5. `pip install -r requirements.txt` and `pip install -e`
//! 6. Write the launcher and put its directory on PATH
//! 7. Download the font (always advisory)
//!
//! [`Deprovisioner::deprovision`] reverses it, asking before each
//! directory is deleted.

pub mod deprovisioner;
pub mod provisioner;
pub mod report;

pub use deprovisioner::{
    DeprovisionOutcome, Deprovisioner, DirectoryRemoval, Removal, REMOVE_CONFIG_PROMPT,
    REMOVE_INSTALL_PROMPT, UNINSTALL_PROMPT,
};
pub use provisioner::{ProvisionOptions, Provisioner};
pub use report::{ProvisionReport, Step, StepRecord, StepStatus};
