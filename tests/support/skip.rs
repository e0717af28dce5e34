/// Skip a test if sops or age-keygen is not on PATH.
#[macro_export]
macro_rules! skip_without_sops {
    () => {
        if which::which("sops").is_err() {
            eprintln!("SKIPPED: sops not found on PATH");
            return;
        }
        if which::which("age-keygen").is_err() {
            eprintln!("SKIPPED: age-keygen not found on PATH");
            return;
        }
    };
}
