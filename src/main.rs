use alefscope::{ScopeContext, SymbolTable};
use miette::Report;
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut globals = SymbolTable::with_context(ScopeContext::traced());
    globals.insert("count", "i64", "0");
    globals.insert("limit", "i64", "3");

    {
        let mut body = globals.child();
        body.copy_from_parent();
        for i in 1..=3 {
            body.update("count", &i.to_string())?;
        }
        body.insert("tmp", "i64", "9");
        body.propagate_to_parent();
    }

    for line in globals.format_bindings() {
        println!("{}", line);
    }

    // Reported, not fatal.
    if let Err(e) = globals.remove("tmp") {
        eprintln!("{:?}", Report::new(e));
    }
    Ok(())
}
