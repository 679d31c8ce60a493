use anyhow::Result;

fn main() -> Result<()> {
    deskscape::flow::run()
}
