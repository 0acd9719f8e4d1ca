fn main() -> anyhow::Result<()> {
    cinescope_lib::run()
}
