/// Render a message template, filling `{name}` placeholders from
/// `name = value` pairs.
///
/// ```
/// use vmpooler_messages::{msg, MESSAGES};
///
/// assert_eq!(msg!(MESSAGES.vm.destroying, hostname = "abc123"), "Destroying abc123");
/// ```
#[macro_export]
macro_rules! msg {
    ($template:expr) => {
        $crate::builder::MessageBuilder::new($template).build()
    };
    ($template:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $crate::builder::MessageBuilder::new($template)
            $(.var(stringify!($key), $value))+
            .build()
    };
}
