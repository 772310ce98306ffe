//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use assert_cmd::Command;
    use std::fs;

    fn cli() -> Command {
        let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        cmd.env("HAAS_TRANSLATOR_LOG_LEVEL", "error")
            .env_remove("HAAS_TRANSLATOR_ENABLED")
            .env_remove("HAAS_TRANSLATOR_FALLBACK_MARKER");
        cmd
    }

    #[test]
    fn translate_arguments() {
        let out = cli().args(["translate", "配置", "Hello", "你好"]).output().unwrap();

        assert!(out.status.success());
        assert_eq!(
            String::from_utf8_lossy(&out.stdout),
            "Configuration\nHello\n[EN] 你好\n"
        );
    }

    #[test]
    fn translate_disabled_by_env() {
        let out = cli()
            .env("HAAS_TRANSLATOR_ENABLED", "false")
            .args(["translate", "配置"])
            .output()
            .unwrap();

        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout), "配置\n");
    }

    #[test]
    fn augment_file() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.html");
        fs::write(&page, "<html><body><p>编译</p></body></html>").unwrap();

        let out = cli().arg("augment").arg(&page).output().unwrap();
        let stdout = String::from_utf8_lossy(&out.stdout);

        assert!(out.status.success());
        assert!(stdout.starts_with("<html><body><p>编译</p><script>"));
        assert!(stdout.ends_with("</script></body></html>"));
    }

    #[test]
    fn scan_file() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.html");
        fs::write(
            &page,
            "<html><body><button>编译</button><script>var s = '隐藏';</script><p>Ready</p></body></html>",
        )
        .unwrap();

        let out = cli().arg("scan").arg(&page).output().unwrap();

        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout), "编译 => Compile\n");
    }

    #[test]
    fn env_docs() {
        let out = cli().arg("env-docs").output().unwrap();
        let stdout = String::from_utf8_lossy(&out.stdout);

        assert!(out.status.success());
        assert!(stdout.contains("HAAS_TRANSLATOR_ENABLED"));
        assert!(stdout.contains("HAAS_TRANSLATOR_CACHE_MAX_ENTRIES"));
    }

    #[test]
    fn env_summary() {
        let out = cli()
            .env("HAAS_TRANSLATOR_CACHE_MAX_ENTRIES", "500")
            .arg("env")
            .output()
            .unwrap();
        let stdout = String::from_utf8_lossy(&out.stdout);

        assert!(out.status.success());
        assert!(stdout.contains("Auto-translation: enabled"));
        assert!(stdout.contains("Cache: 500 entries"));
    }

    #[test]
    fn init_config_then_use_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("haas-translator.toml");

        cli().arg("init-config").arg(&path).assert().success();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("fallback_marker"));

        fs::write(&path, written.replace("[EN] ", "[MT] ")).unwrap();
        let out = cli()
            .arg("--config")
            .arg(&path)
            .args(["translate", "你好"])
            .output()
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&out.stdout), "[MT] 你好\n");
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use assert_cmd::Command;

    #[test]
    fn missing_file() {
        Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .args(["augment", "/nonexistent/page.html"])
            .assert()
            .failure();
    }

    #[test]
    fn env_rejects_invalid_value() {
        Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .env("HAAS_TRANSLATOR_ENABLED", "maybe")
            .arg("env")
            .assert()
            .failure();
    }

    #[test]
    fn translate_requires_text() {
        Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .arg("translate")
            .assert()
            .failure();
    }

    #[test]
    fn invalid_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "target_lang = \"\"\n").unwrap();

        Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .arg("--config")
            .arg(&path)
            .args(["translate", "配置"])
            .assert()
            .failure();
    }
}
