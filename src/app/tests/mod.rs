mod routing_flow;
