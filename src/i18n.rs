// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）、阿拉伯文、中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" / "ar" / "zh-CN"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use asset_admin::i18n::t;
/// let msg = t("toast.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use asset_admin::i18n::t_with_args;
/// let msg = t_with_args("import.partial_failure", &[("count", "3")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 测试用的全局语言锁
///
/// rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
/// 依赖消息文本的测试需持有此锁。
#[cfg(test)]
pub(crate) static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("ar");
        assert_eq!(current_locale(), "ar");

        set_locale("en");
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(t("toast.success"), "Success");

        set_locale("ar");
        assert_eq!(t("toast.success"), "نجاح");

        set_locale("en");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let msg = t_with_args(
            "import.success",
            &[("success", "4"), ("total", "5")],
        );
        assert!(msg.contains('4'));
        assert!(msg.contains('5'));
        assert!(!msg.contains("%{"));
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("xx");
        assert_eq!(t("toast.error"), "Error");
        set_locale("en");
    }
}
