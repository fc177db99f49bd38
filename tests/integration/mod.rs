mod documents_flow;
