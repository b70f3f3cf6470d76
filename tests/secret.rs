#[cfg(test)]
mod tests {
    use chronolog::libs::secret::Secret;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct SecretTestContext {
        _temp_dir: TempDir,
        secret_path: PathBuf,
    }

    impl TestContext for SecretTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let secret_path = temp_dir.path().join("nested").join(".jira_secret");
            SecretTestContext {
                _temp_dir: temp_dir,
                secret_path,
            }
        }
    }

    #[test_context(SecretTestContext)]
    #[test]
    fn test_write_and_read(ctx: &mut SecretTestContext) {
        let secret = Secret::at(&ctx.secret_path, "token");
        secret.write("s3cr3t-token").unwrap();

        assert_eq!(secret.read().unwrap(), "s3cr3t-token");
        assert_eq!(secret.get_or_prompt().unwrap(), "s3cr3t-token");

        let stored = fs::read_to_string(&ctx.secret_path).unwrap();
        assert!(!stored.contains("s3cr3t-token"));
    }

    #[test_context(SecretTestContext)]
    #[test]
    fn test_overwrite(ctx: &mut SecretTestContext) {
        let secret = Secret::at(&ctx.secret_path, "token");
        secret.write("first").unwrap();
        secret.write("second").unwrap();

        assert_eq!(secret.read().unwrap(), "second");
    }

    #[test_context(SecretTestContext)]
    #[test]
    fn test_corrupted_file_is_an_error(ctx: &mut SecretTestContext) {
        fs::create_dir_all(ctx.secret_path.parent().unwrap()).unwrap();
        fs::write(&ctx.secret_path, "not base64 at all!").unwrap();

        assert!(Secret::at(&ctx.secret_path, "token").read().is_err());
    }

    #[test_context(SecretTestContext)]
    #[test]
    fn test_missing_file_is_an_error(ctx: &mut SecretTestContext) {
        assert!(Secret::at(&ctx.secret_path, "token").read().is_err());
    }
}
