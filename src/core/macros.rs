//! 核心宏定义

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use spark_emitter::impl_default;
///
/// struct Spark {
///     brightness: f64,
///     label: String,
/// }
///
/// impl_default!(Spark {
///     brightness: 1.0,
///     label: String::from("spark"),
/// });
///
/// assert_eq!(Spark::default().brightness, 1.0);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}
