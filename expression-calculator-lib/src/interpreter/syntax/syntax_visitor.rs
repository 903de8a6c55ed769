use crate::interpreter::operator::{BinaryOperator, UnaryFunction};
use crate::interpreter::syntax::expression_tree::Node;

/// If a method is not implemented, the default implementation will continue in a pre-order
/// traversal of the tree.
pub(crate) trait SyntaxVisitor: Sized {
    fn visit_number(&mut self, _value: f64) {}
    fn visit_binary_operation(
        &mut self,
        _operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        walk_operands(self, left_operand, right_operand)
    }
    fn visit_power(&mut self, base: &Node, exponent: &Node) {
        walk_operands(self, base, exponent)
    }
    fn visit_factorial(&mut self, operand: &Node) {
        walk_operand(self, operand)
    }
    fn visit_function_call(&mut self, _function: &UnaryFunction, argument: &Node) {
        walk_operand(self, argument)
    }
}

pub(crate) fn walk_operands(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &Node,
    right_operand: &Node,
) {
    left_operand.accept(visitor);
    right_operand.accept(visitor);
}

pub(crate) fn walk_operand(visitor: &mut impl SyntaxVisitor, operand: &Node) {
    operand.accept(visitor);
}
