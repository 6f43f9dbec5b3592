fn main() -> anyhow::Result<()> {
    genoped::cli::run()
}
