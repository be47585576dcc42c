//! Run outcome and shared messages.

pub struct CommonMessages {
    pub success: &'static str,
    pub failed: &'static str,
    pub config_invalid_replaced: &'static str,
    pub config_save_failed: &'static str,
    pub logging_init_failed: &'static str,
}

pub const COMMON_MESSAGES: CommonMessages = CommonMessages {
    success: "\nSuccess!",
    failed: "\nFailed!",
    config_invalid_replaced: "The \"{path}\" configuration file is invalid! Replaced with default configuration file!",
    config_save_failed: "Could not save the configuration file \"{path}\"",
    logging_init_failed: "Failed to initialize logging: {error}",
};
