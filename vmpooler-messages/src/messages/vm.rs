//! VM listing, acquisition and destruction messages.

pub struct VmMessages {
    pub hostname: &'static str,
    pub no_templates_matching: &'static str,
    pub running_entry: &'static str,
    pub none_running: &'static str,
    pub destroying: &'static str,
    pub nothing_to_destroy: &'static str,
}

pub const VM_MESSAGES: VmMessages = VmMessages {
    hostname: "Hostname: {hostname}",
    no_templates_matching: "No templates found matching '{search}'",
    running_entry: "{hostname} | Running: {running} hours | {template}",
    none_running: "No VMs running for this user",
    destroying: "Destroying {hostname}",
    nothing_to_destroy: "No VMs to destroy",
};
