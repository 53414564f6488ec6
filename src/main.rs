fn main() -> anyhow::Result<()> {
    hapmap_encode::cli::run()
}
