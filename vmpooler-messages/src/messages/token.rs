//! Auth token messages.

pub struct TokenMessages {
    pub created: &'static str,
    pub revoked: &'static str,
}

pub const TOKEN_MESSAGES: TokenMessages = TokenMessages {
    created: "\nToken: {token}",
    revoked: "Token {token} revoked",
};
