fn main() -> anyhow::Result<()> {
    filey::cli::run()
}
