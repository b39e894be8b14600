//! Debug subcommands: `ast` and `bytecode`.

use std::process;

use aster_core::ScopeLimits;

use crate::utils::read_source_or_exit;

/// Print the parsed AST for debugging.
pub fn handle_ast(file: &str) {
    let source = read_source_or_exit(file);
    match aster_ast::parse_source(&source, std::rc::Rc::from(file)) {
        Ok(stmts) => println!("{stmts:#?}"),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

/// Print the compiled bytecode for debugging: the module's top-level
/// chunk followed by each function prototype's chunk, disassembled.
pub fn handle_bytecode(file: &str) {
    let source = read_source_or_exit(file);
    let stmts = match aster_ast::parse_source(&source, std::rc::Rc::from(file)) {
        Ok(stmts) => stmts,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let compiled = match aster_compiler::compile(&stmts, ScopeLimits::default()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    println!("<module>:");
    print!("{}", compiled.main.disassemble());
    for f in &compiled.functions {
        println!("\nfn {} ({} params):", f.name, f.arity);
        print!("{}", f.chunk.disassemble());
    }
}
