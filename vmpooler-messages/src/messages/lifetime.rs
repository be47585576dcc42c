//! VM lifetime messages.

pub struct LifetimeMessages {
    pub current: &'static str,
    pub extended: &'static str,
    pub extend_out_of_bounds: &'static str,
}

pub const LIFETIME_MESSAGES: LifetimeMessages = LifetimeMessages {
    current: "lifetime: {hours} hours",
    extended: "Lifetime extended to roughly {hours} hours from now",
    extend_out_of_bounds: "The new lifetime would be \"{hours}\" hours. It should be between \"0\" and \"{max}\" hours",
};
