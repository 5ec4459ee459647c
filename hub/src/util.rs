/// Build an extend source from `key => value` entries.
///
/// Expands to a `Vec<(String, Value)>` in entry order, so later entries win
/// on key collision when merged. Values may be any [`Extension`](crate::Extension).
///
/// ```ignore
/// hub.extend(props! {
///     "name" => "docs",
///     "debug" => true,
/// });
/// ```
#[macro_export]
macro_rules! props {
    () => {
        ::std::vec::Vec::<(::std::string::String, $crate::Value)>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$((::std::string::String::from($key), $crate::value($value))),+]
    };
}
