/// Parser for textual vector/matrix literals such as `vec3(1, 0.5, -2)`
///
/// The accepted syntax is exactly what `Display` prints, so values can be
/// logged and read back. Matrix literals list components in row-major order.
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0, one_of},
    combinator::{all_consuming, map, value},
    multi::{many0, separated_list0},
    number::complete::float,
    sequence::{delimited, preceded},
    IResult,
};

use crate::error::{MathError, MathResult};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Vector,
    Matrix,
}

/// Parse a single literal, allowing surrounding whitespace
pub fn parse_value(input: &str) -> MathResult<Value> {
    match all_consuming(parse_literal)(input) {
        Ok((_, literal)) => build(literal),
        Err(e) => Err(MathError::Parse(format!("invalid literal {:?}: {:?}", input, e))),
    }
}

/// Parse a whitespace-separated sequence of literals
pub fn parse_values(input: &str) -> MathResult<Vec<Value>> {
    let literals = match all_consuming(many0(parse_literal))(input) {
        Ok((_, literals)) => literals,
        Err(e) => return Err(MathError::Parse(format!("invalid literal list: {:?}", e))),
    };
    literals.into_iter().map(build).collect()
}

fn build((shape, dim, components): (Shape, usize, Vec<f32>)) -> MathResult<Value> {
    match shape {
        Shape::Vector => Value::vector(dim, &components),
        Shape::Matrix => Value::matrix(dim, &components),
    }
}

fn parse_literal(input: &str) -> IResult<&str, (Shape, usize, Vec<f32>)> {
    let (input, shape) = preceded(multispace0, parse_shape)(input)?;
    let (input, dim) = parse_dimension(input)?;
    let (input, components) = parse_components(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (shape, dim, components)))
}

fn parse_shape(input: &str) -> IResult<&str, Shape> {
    alt((
        value(Shape::Vector, tag("vec")),
        value(Shape::Matrix, tag("mat")),
    ))(input)
}

fn parse_dimension(input: &str) -> IResult<&str, usize> {
    map(one_of("234"), |c| (c as u8 - b'0') as usize)(input)
}

fn parse_components(input: &str) -> IResult<&str, Vec<f32>> {
    delimited(
        preceded(multispace0, char('(')),
        separated_list0(
            preceded(multispace0, char(',')),
            preceded(multispace0, float),
        ),
        preceded(multispace0, char(')')),
    )(input)
}

impl FromStr for Value {
    type Err = MathError;

    fn from_str(s: &str) -> MathResult<Self> {
        parse_value(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Mat2, Mat4};
    use crate::transform::Transform;
    use crate::vector::{Vec3, Vec4};

    #[test]
    fn test_parse_vector() {
        let v = parse_value("vec3(1, 0.5, -2)").unwrap();
        assert_eq!(v, Value::Vec3(Vec3::from_xyz(1.0, 0.5, -2.0)));

        let v: Value = "  vec4( 1 ,2,3 , 4 )  ".parse().unwrap();
        assert_eq!(v, Value::Vec4(Vec4::from_xyzw(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(parse_value("vec2()").unwrap(), Value::Vec2(Default::default()));
        assert_eq!(parse_value("mat4()").unwrap(), Value::Mat4(Mat4::identity()));
    }

    #[test]
    fn test_parse_matrix_row_major() {
        let m = parse_value("mat2(1, 2, 3, 4)").unwrap();
        assert_eq!(m, Value::Mat2(Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]])));
    }

    #[test]
    fn test_wrong_component_count() {
        let err = parse_value("vec3(1, 2)").unwrap_err();
        assert!(matches!(err, MathError::InvalidArgument(_)));

        let err = parse_value("mat2(1, 2, 3)").unwrap_err();
        assert!(matches!(err, MathError::InvalidArgument(_)));
    }

    #[test]
    fn test_malformed() {
        for input in ["", "vec5(1, 2)", "vec3(1, 2, 3", "vec3(1 2 3)", "vec3(1, 2, 3) junk", "quat(1)"] {
            let err = parse_value(input).unwrap_err();
            assert!(matches!(err, MathError::Parse(_)), "{input:?} gave {err:?}");
        }
    }

    #[test]
    fn test_display_round_trip() {
        let m = Transform::translate(1.5, -2.0, 0.25) * Transform::scale(2.0, 2.0, 2.0);
        let parsed = parse_value(&m.to_string()).unwrap();
        assert_eq!(parsed, Value::Mat4(m));
    }

    #[test]
    fn test_parse_values() {
        let values = parse_values("vec3(0, 0, 1)\nvec3(0, 1, 0)\n  mat2()").unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[1], Value::Vec3(Vec3::from_xyz(0.0, 1.0, 0.0)));
        assert!(values[2].is_matrix());

        assert!(parse_values("").unwrap().is_empty());
        assert!(parse_values("vec3(0, 0, 1) vec3(0)").is_err());
    }
}
