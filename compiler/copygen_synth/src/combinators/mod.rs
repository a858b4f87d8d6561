//! Combinator library emitter.
//!
//! A single pass over every synthesized tree collects the helpers generated
//! code refers to. A combinator applied directly to a field value needs only
//! its direct form. One passed as a value (a dictionary, or the element
//! function of an outer combinator) needs its curried form, which in turn
//! delegates to the direct one. Identity is only ever needed as a value.

use std::collections::BTreeSet;

use crate::{CombinatorDef, CombinatorKind, CopyConstructor, CopyExpr, CopyFn, DispatchFactory};

/// Collect, deduplicate and order the helper combinators.
///
/// Emission order is [`CombinatorKind`]'s declaration order, independent of
/// where in the model a helper was first needed.
#[tracing::instrument(level = "debug", skip_all)]
pub fn emit(constructors: &[CopyConstructor], dispatchers: &[DispatchFactory]) -> Vec<CombinatorDef> {
    let mut used = BTreeSet::new();
    for ctor in constructors {
        for field in &ctor.fields {
            visit_expr(&field.expr, &mut used);
        }
    }
    for factory in dispatchers {
        for arm in &factory.arms {
            for dict in &arm.call.dictionaries {
                visit_value(dict, &mut used);
            }
        }
    }
    tracing::debug!(kinds = ?used, "combinator library");
    used.into_iter().map(CombinatorDef::of).collect()
}

fn visit_expr(expr: &CopyExpr, used: &mut BTreeSet<CombinatorKind>) {
    match expr {
        CopyExpr::Read { .. } => {}
        CopyExpr::Apply { func, arg } => {
            visit_applied(func, used);
            visit_expr(arg, used);
        }
        CopyExpr::SelectDepth { deep, shallow } => {
            visit_expr(deep, used);
            visit_expr(shallow, used);
        }
    }
}

/// `func` is called on a value at this position.
fn visit_applied(func: &CopyFn, used: &mut BTreeSet<CombinatorKind>) {
    match func {
        CopyFn::Lift { container, element } => {
            used.insert(CombinatorKind::direct(*container));
            visit_value(element, used);
        }
        CopyFn::Guard(inner) => visit_applied(inner, used),
        CopyFn::Construct(call) => {
            for dict in &call.dictionaries {
                visit_value(dict, used);
            }
        }
        CopyFn::Identity | CopyFn::Dispatch(_) | CopyFn::Dictionary(_) => {}
    }
}

/// `func` is passed along as a function value at this position.
fn visit_value(func: &CopyFn, used: &mut BTreeSet<CombinatorKind>) {
    match func {
        CopyFn::Lift { container, element } => {
            let curried = CombinatorKind::curried(*container);
            used.insert(curried);
            used.extend(curried.requires());
            visit_value(element, used);
        }
        CopyFn::Identity => {
            used.insert(CombinatorKind::Identity);
        }
        // Closures over the inner call; the call itself is direct.
        CopyFn::Guard(inner) => visit_applied(inner, used),
        CopyFn::Construct(call) => {
            for dict in &call.dictionaries {
                visit_value(dict, used);
            }
        }
        CopyFn::Dispatch(_) | CopyFn::Dictionary(_) => {}
    }
}
