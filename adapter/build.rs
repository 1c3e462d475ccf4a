fn main() {
    // DATABASE_URL があるときだけ #[sqlx::test] を実行対象にする
    println!("cargo:rustc-check-cfg=cfg(database_tests)");
    println!("cargo:rerun-if-env-changed=DATABASE_URL");
    if std::env::var_os("DATABASE_URL").is_some() {
        println!("cargo:rustc-cfg=database_tests");
    }
}
