//! `math` native module.

use aster_core::{Heap, NativeFn, NativeModuleObj, Obj, Value};

const PI: f64 = std::f64::consts::PI;
const E: f64 = std::f64::consts::E;

fn arg_num(args: &[Value], i: usize) -> Result<f64, String> {
    match args.get(i) {
        Some(Value::Int(n)) => Ok(*n as f64),
        Some(Value::Float(f)) => Ok(*f),
        _ => Err(format!("argument {i} is not a number")),
    }
}

fn min(_heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    match (args.get(0), args.get(1)) {
        (Some(Value::Int(a)), Some(Value::Int(b))) => Ok(Value::Int((*a).min(*b))),
        _ => Ok(Value::Float(arg_num(args, 0)?.min(arg_num(args, 1)?))),
    }
}

fn max(_heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    match (args.get(0), args.get(1)) {
        (Some(Value::Int(a)), Some(Value::Int(b))) => Ok(Value::Int((*a).max(*b))),
        _ => Ok(Value::Float(arg_num(args, 0)?.max(arg_num(args, 1)?))),
    }
}

macro_rules! unary_float_fn {
    ($name:ident, $method:ident) => {
        fn $name(_heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
            Ok(Value::Float(arg_num(args, 0)?.$method()))
        }
    };
}

unary_float_fn!(sqrt, sqrt);
unary_float_fn!(cos, cos);
unary_float_fn!(acos, acos);
unary_float_fn!(cosh, cosh);
unary_float_fn!(sin, sin);
unary_float_fn!(asin, asin);
unary_float_fn!(sinh, sinh);
unary_float_fn!(tan, tan);
unary_float_fn!(atan, atan);
unary_float_fn!(tanh, tanh);

fn pow(_heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    Ok(Value::Float(arg_num(args, 0)?.powf(arg_num(args, 1)?)))
}

fn rad2deg(_heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    Ok(Value::Float(arg_num(args, 0)?.to_degrees()))
}

fn deg2rad(_heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    Ok(Value::Float(arg_num(args, 0)?.to_radians()))
}

pub fn register(heap: &mut Heap) -> NativeModuleObj {
    let mut m = NativeModuleObj { name: "math".to_string(), members: Default::default() };
    m.members.insert("PI".to_string(), Value::Float(PI));
    m.members.insert("E".to_string(), Value::Float(E));

    let fns: &[(&str, i32, aster_core::NativeFnPtr)] = &[
        ("min", 2, min),
        ("max", 2, max),
        ("sqrt", 1, sqrt),
        ("pow", 2, pow),
        ("cos", 1, cos),
        ("acos", 1, acos),
        ("cosh", 1, cosh),
        ("sin", 1, sin),
        ("asin", 1, asin),
        ("sinh", 1, sinh),
        ("tan", 1, tan),
        ("atan", 1, atan),
        ("tanh", 1, tanh),
        ("rad2deg", 1, rad2deg),
        ("deg2rad", 1, deg2rad),
    ];
    for (name, arity, func) in fns {
        let r = heap.alloc(Obj::NativeFn(NativeFn { name: name.to_string(), arity: *arity, func: *func }));
        m.members.insert(name.to_string(), Value::Obj(r));
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_constants_and_functions() {
        let mut heap = Heap::new();
        let m = register(&mut heap);
        assert_eq!(m.members.get("PI"), Some(&Value::Float(PI)));
        assert!(m.members.contains_key("sqrt"));
    }

    #[test]
    fn sqrt_computes() {
        let mut heap = Heap::new();
        assert_eq!(sqrt(&mut heap, &[Value::Float(4.0)]).unwrap(), Value::Float(2.0));
    }
}
