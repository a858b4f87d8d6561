//! Debug listing of synthesized artifacts.
//!
//! Neutral pseudo-code for logs and tests, not target-language source:
//!
//! ```text
//! PagedList(source, deep, copy_T, copy_A)
//!     page = source.page
//!     items = deep ? seq(copy_T)(source.items) : source.items
//!     additionalInfo = copy_A(source.additionalInfo)
//! ```

use std::fmt::Write;

use copygen_model::{ClassType, TypeGraph};

use crate::{
    ConstructCall, Container, CopyConstructor, CopyExpr, CopyFn, CtorParam, DepthArg,
    DispatchFactory, SynthOutput,
};

/// Render one copy function. `owner` names dictionaries after its type
/// parameters.
pub fn render_fn(graph: &TypeGraph, owner: Option<&ClassType>, func: &CopyFn) -> String {
    let mut out = String::new();
    write_fn(&mut out, graph, owner, func);
    out
}

pub fn render_expr(graph: &TypeGraph, owner: Option<&ClassType>, expr: &CopyExpr) -> String {
    let mut out = String::new();
    write_expr(&mut out, graph, owner, expr);
    out
}

pub fn render_constructor(graph: &TypeGraph, ctor: &CopyConstructor) -> String {
    let owner = graph.class(ctor.class);
    let mut out = String::new();
    let params: Vec<String> = ctor
        .params
        .iter()
        .map(|param| match param {
            CtorParam::Source => "source".to_owned(),
            CtorParam::DepthFlag => "deep".to_owned(),
            CtorParam::Dictionary { var, .. } => format!("copy_{var}"),
        })
        .collect();
    let _ = writeln!(out, "{}({})", owner.name, params.join(", "));

    if let Some(step) = ctor.base_step {
        let flag = if step.forward_depth { ", deep" } else { "" };
        let _ = writeln!(out, "    base {}(source{flag})", graph.class(step.base).name);
    }
    for field in &ctor.fields {
        let _ = write!(out, "    {} = ", field.field);
        write_expr(&mut out, graph, Some(owner), &field.expr);
        out.push('\n');
    }
    out
}

pub fn render_dispatch(graph: &TypeGraph, factory: &DispatchFactory) -> String {
    let union = graph.union(factory.union);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}::copy_of(source) by source.{}",
        union.name, factory.discriminant_field
    );
    for arm in &factory.arms {
        let _ = write!(out, "    {:?} => ", arm.literal);
        write_call(&mut out, graph, None, &arm.call);
        out.push('\n');
    }
    out
}

/// Render every artifact of a run, classes first.
pub fn render_output(graph: &TypeGraph, output: &SynthOutput) -> String {
    let mut out = String::new();
    for ctor in &output.constructors {
        out.push_str(&render_constructor(graph, ctor));
        out.push('\n');
    }
    for factory in &output.dispatchers {
        out.push_str(&render_dispatch(graph, factory));
        out.push('\n');
    }
    let names: Vec<&str> = output.combinators.iter().map(|def| def.name).collect();
    let _ = writeln!(out, "combinators: {}", names.join(", "));
    out
}

fn write_expr(out: &mut String, graph: &TypeGraph, owner: Option<&ClassType>, expr: &CopyExpr) {
    match expr {
        CopyExpr::Read { field } => {
            let _ = write!(out, "source.{field}");
        }
        CopyExpr::Apply { func, arg } => {
            write_fn(out, graph, owner, func);
            out.push('(');
            write_expr(out, graph, owner, arg);
            out.push(')');
        }
        CopyExpr::SelectDepth { deep, shallow } => {
            out.push_str("deep ? ");
            write_expr(out, graph, owner, deep);
            out.push_str(" : ");
            write_expr(out, graph, owner, shallow);
        }
    }
}

fn write_fn(out: &mut String, graph: &TypeGraph, owner: Option<&ClassType>, func: &CopyFn) {
    match func {
        CopyFn::Identity => out.push_str("identity"),
        CopyFn::Construct(call) => write_call(out, graph, owner, call),
        CopyFn::Dispatch(union) => {
            let _ = write!(out, "{}::copy_of", graph.union(*union).name);
        }
        CopyFn::Dictionary(index) => match owner.and_then(|c| c.type_params.get(*index)) {
            Some(var) => {
                let _ = write!(out, "copy_{var}");
            }
            None => {
                let _ = write!(out, "copy_#{index}");
            }
        },
        CopyFn::Guard(inner) => {
            out.push_str("guard(");
            write_fn(out, graph, owner, inner);
            out.push(')');
        }
        CopyFn::Lift { container, element } => {
            out.push_str(match container {
                Container::Sequence => "seq(",
                Container::StringMap => "map(",
            });
            write_fn(out, graph, owner, element);
            out.push(')');
        }
    }
}

fn write_call(out: &mut String, graph: &TypeGraph, owner: Option<&ClassType>, call: &ConstructCall) {
    let _ = write!(out, "new {}", graph.class(call.class).name);
    if call.depth == DepthArg::Omitted && call.dictionaries.is_empty() {
        return;
    }
    out.push('(');
    let mut first = true;
    if call.depth == DepthArg::Deep {
        out.push_str("true");
        first = false;
    }
    for dict in &call.dictionaries {
        if !first {
            out.push_str(", ");
        }
        first = false;
        write_fn(out, graph, owner, dict);
    }
    out.push(')');
}
