mod debug_flow;
mod execution_flow;
mod routing_flow;
